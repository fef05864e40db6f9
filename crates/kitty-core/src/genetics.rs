//! Deterministic genome mixing.

use crate::state::Genes;

/// Combines two parent genomes into a child genome.
///
/// The combinator is the bitwise exclusive-or of both genomes: pure,
/// deterministic, and **commutative** (`mix_genes(a, b) == mix_genes(b, a)`).
/// Downstream consumers may depend on exact output, so the combinator must
/// not change without a coordinated migration.
#[inline]
pub fn mix_genes(matron_genes: Genes, sire_genes: Genes) -> Genes {
    Genes(matron_genes.0 ^ sire_genes.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixing_is_deterministic() {
        let a = Genes(0xdead_beef_cafe_f00d);
        let b = Genes(0x0123_4567_89ab_cdef);
        assert_eq!(mix_genes(a, b), mix_genes(a, b));
        assert_eq!(mix_genes(a, b), Genes(0xdead_beef_cafe_f00d ^ 0x0123_4567_89ab_cdef));
    }

    #[test]
    fn mixing_is_commutative() {
        let a = Genes(0xaaaa_5555_aaaa_5555);
        let b = Genes(0x00ff_00ff_00ff_00ff);
        assert_eq!(mix_genes(a, b), mix_genes(b, a));
    }

    #[test]
    fn child_depends_on_both_parents() {
        let a = Genes(0xffff_0000_ffff_0000);
        let b = Genes(0x0000_ffff_0000_ffff);
        let child = mix_genes(a, b);
        assert_ne!(child, a);
        assert_ne!(child, b);
    }
}
