/// Restricts where the jump may leave the first reference and re-enter the
/// second.
///
/// `exit_sites` are 0-based offsets into the first reference: the jump may
/// be taken immediately after aligning `ref1[site]`. `entry_sites` are
/// 0-based offsets into the second reference: the jump may re-enter the
/// match state on the symbol `ref2[site]`. Breakend insertions at the
/// junction are not restricted.
///
/// A model with an empty exit or entry set places no restriction at all,
/// matching the behavior of the unconstrained aligner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneModel {
    exit_sites: Vec<usize>,
    entry_sites: Vec<usize>,
}

impl GeneModel {
    pub fn new(exit_sites: Vec<usize>, entry_sites: Vec<usize>) -> Self {
        Self {
            exit_sites,
            entry_sites,
        }
    }

    pub fn exit_sites(&self) -> &[usize] {
        &self.exit_sites
    }

    pub fn entry_sites(&self) -> &[usize] {
        &self.entry_sites
    }

    pub fn is_unconstrained(&self) -> bool {
        self.exit_sites.is_empty() || self.entry_sites.is_empty()
    }

    /// Per-column jump permission for the first reference pass; index `r`
    /// answers whether the jump may leave after reference column `r`
    /// (1-based). Sites beyond the reference are ignored.
    pub(crate) fn exit_mask(&self, ref1_size: usize) -> Vec<bool> {
        Self::site_mask(&self.exit_sites, ref1_size)
    }

    /// Per-column jump re-entry permission for the second reference pass.
    pub(crate) fn entry_mask(&self, ref2_size: usize) -> Vec<bool> {
        Self::site_mask(&self.entry_sites, ref2_size)
    }

    fn site_mask(sites: &[usize], ref_size: usize) -> Vec<bool> {
        let mut mask = vec![false; ref_size + 1];
        for &site in sites {
            if site < ref_size {
                mask[site + 1] = true;
            }
        }
        mask
    }
}
