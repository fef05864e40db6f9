//! Demo walkthrough: seed a genesis pair, breed them, deliver the kitten,
//! and hand it to a new owner, logging every committed event.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use kitty_core::{Genes, Identity, KittyId, Timestamp};
use runtime::{FixedClock, InMemoryLedger, KittyContract, StaticCaller, Topic};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // A fixed clock keeps the walkthrough deterministic; a deployment
    // would wire the transport's transaction timestamp here instead.
    let clock = FixedClock::new(Timestamp(1));
    let contract = KittyContract::new(
        InMemoryLedger::new(),
        clock.clone(),
        StaticCaller::new("alice"),
    );

    let mut breeding = contract.subscribe(Topic::Breeding);
    let mut ownership = contract.subscribe(Topic::Ownership);

    let alice = Identity::from("alice");
    let matron = contract.create_kitty(
        KittyId::NONE,
        KittyId::NONE,
        0,
        Genes(0xd00d_face_0000_aaaa),
        alice.clone(),
    )?;
    let sire = contract.create_kitty(
        KittyId::NONE,
        KittyId::NONE,
        0,
        Genes(0x0000_beef_5555_0000),
        alice.clone(),
    )?;
    tracing::info!(%matron, %sire, "seeded genesis kitties");

    // Let the 1-second genesis cooldown pass, then mate the pair.
    clock.advance(2);
    contract.breed_with_auto(sire, matron)?;
    tracing::info!(%matron, "matron is pregnant");

    clock.advance(5);
    let child = contract.give_birth(matron)?;
    let kitten = contract.kitty(child)?;
    tracing::info!(
        %child,
        genes = %kitten.genes,
        generation = kitten.generation,
        "kitten delivered"
    );

    contract.transfer(alice, Identity::from("bob"), child)?;
    tracing::info!(%child, "kitten handed to bob");

    // Drop the contract so the bus closes once the backlog is drained.
    drop(contract);
    while let Ok(event) = breeding.recv().await {
        tracing::info!(topic = "breeding", name = event.name(), ?event, "committed event");
    }
    while let Ok(event) = ownership.recv().await {
        tracing::info!(topic = "ownership", name = event.name(), ?event, "committed event");
    }

    Ok(())
}
