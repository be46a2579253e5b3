//! Static per-board feature predicates.

use serde::{Deserialize, Serialize};

/// Board attributes the amendment steps branch on.
///
/// `has_fpu` is tracked separately from the precision flags: some boards have
/// no hardware FPU but still want the floating-point attribute packages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeaturePredicates {
    /// Runs without an operating system
    pub is_bareboard: bool,
    /// Floating-point attribute support is built in
    pub has_fpu: bool,
    /// Hardware single-precision FPU
    pub has_single_precision_fpu: bool,
    /// Hardware double-precision FPU
    pub has_double_precision_fpu: bool,
    /// Runtime provides memcpy/memmove/memset/memcmp
    pub supports_mem_routines: bool,
    /// Runtime ships C library support files
    pub supports_libc: bool,
    /// Exceptions propagate through ARM EHABI zero-cost tables
    pub uses_zcx: bool,
}

impl FeaturePredicates {
    /// A bareboard target with no FPU and no optional runtime support.
    pub fn bareboard() -> Self {
        FeaturePredicates {
            is_bareboard: true,
            ..Default::default()
        }
    }

    /// A hosted target (runs on top of an OS).
    pub fn hosted() -> Self {
        FeaturePredicates::default()
    }

    /// Set hardware FPU precision. `has_fpu` follows the precision flags.
    pub fn with_fpu(mut self, single: bool, double: bool) -> Self {
        self.has_single_precision_fpu = single;
        self.has_double_precision_fpu = double;
        self.has_fpu = single || double;
        self
    }

    /// Keep floating-point attributes without a hardware FPU.
    pub fn with_soft_fp_attributes(mut self) -> Self {
        self.has_fpu = true;
        self
    }

    /// Provide the memory routines from the runtime.
    pub fn with_mem_routines(mut self, enabled: bool) -> Self {
        self.supports_mem_routines = enabled;
        self
    }

    /// Ship C library support files.
    pub fn with_libc(mut self, enabled: bool) -> Self {
        self.supports_libc = enabled;
        self
    }

    /// Use ARM zero-cost exceptions.
    pub fn with_zcx(mut self, enabled: bool) -> Self {
        self.uses_zcx = enabled;
        self
    }

    /// The floating-point ABI variant string used in generated configs.
    pub fn float_abi(&self) -> &'static str {
        if self.has_single_precision_fpu || self.has_double_precision_fpu {
            "hard"
        } else {
            "soft"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fpu_flags_follow_precision() {
        let p = FeaturePredicates::bareboard().with_fpu(true, false);
        assert!(p.has_fpu);
        assert!(p.has_single_precision_fpu);
        assert!(!p.has_double_precision_fpu);
        assert_eq!(p.float_abi(), "hard");

        let p = FeaturePredicates::bareboard().with_fpu(false, false);
        assert!(!p.has_fpu);
        assert_eq!(p.float_abi(), "soft");
    }

    #[test]
    fn test_soft_fp_attributes() {
        let p = FeaturePredicates::bareboard().with_soft_fp_attributes();
        assert!(p.has_fpu);
        assert!(!p.has_single_precision_fpu);
        assert_eq!(p.float_abi(), "soft");
    }

    #[test]
    fn test_hosted_is_not_bareboard() {
        assert!(!FeaturePredicates::hosted().is_bareboard);
        assert!(FeaturePredicates::bareboard().is_bareboard);
    }
}
