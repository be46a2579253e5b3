//! Base defaults shared by every board.
//!
//! This layer is first in every ancestry. It seeds the file lists that the
//! family and board layers extend, and it is the only layer that branches on
//! the feature predicates for whole groups of files.

use crate::core::{Amendment, FileCategory, Layer};
use crate::resolver::ResolveError;

const MEM_ROUTINES: &[&str] = &[
    "s-memcom.ads",
    "s-memcom.adb",
    "s-memcop.ads",
    "s-memcop.adb",
    "s-memmov.ads",
    "s-memmov.adb",
    "s-memset.ads",
    "s-memset.adb",
];

const FLOAT_ATTRIBUTES: &[&str] = &[
    "s-fatflt.ads",
    "s-fatlfl.ads",
    "s-fatllf.ads",
    "s-fatsfl.ads",
    "s-lidosq.ads",
    "s-lidosq.adb",
    "s-lisisq.ads",
    "s-lisisq.adb",
];

const LIBC_SUPPORT: &[&str] = &["s-cmallo.ads", "s-cmallo.adb", "s-cstrle.ads", "s-cstrle.adb"];

/// Scheduler, protection and timing sources of the restricted-tasking kernel.
const TASKING_KERNEL: &[&str] = &[
    "s-bb.ads",
    "s-bbbosu.ads",
    "s-bbbosu.adb",
    "s-bbcppr.ads",
    "s-bbcppr.adb",
    "s-bbinte.ads",
    "s-bbinte.adb",
    "s-bbprot.ads",
    "s-bbprot.adb",
    "s-bbthqu.ads",
    "s-bbthqu.adb",
    "s-bbthre.ads",
    "s-bbthre.adb",
    "s-bbtime.ads",
    "s-bbtime.adb",
    "s-musplo.ads",
    "s-musplo.adb",
];

/// Exception propagation and traceback sources.
const EXCEPTION_PROPAGATION: &[&str] = &[
    "a-exexpr.adb",
    "s-excmac.ads",
    "s-stalib.ads",
    "s-traceb.ads",
    "s-traceb.adb",
    "unwind-gcc.c",
];

pub fn layer() -> Layer {
    Layer::base("base")
        .on_minimal(minimal)
        .on_restricted(restricted)
        .on_full(full)
}

fn minimal(a: &mut Amendment<'_>) -> Result<(), ResolveError> {
    let predicates = *a.predicates();

    a.append(
        FileCategory::Bsp,
        ["s-textio.ads", "s-textio.adb", "s-macres.ads", "s-macres.adb"],
    )?;

    if predicates.supports_mem_routines {
        a.append(FileCategory::Common, MEM_ROUTINES.iter().copied())?;
    }
    if predicates.has_fpu {
        a.append(FileCategory::Common, FLOAT_ATTRIBUTES.iter().copied())?;
    }
    if predicates.supports_libc {
        a.append(FileCategory::Common, LIBC_SUPPORT.iter().copied())?;
    }

    if predicates.is_bareboard {
        a.append_flags("c_flags", ["-DIN_RTS", "-Dinhibit_libc"]);
    }
    Ok(())
}

fn restricted(a: &mut Amendment<'_>) -> Result<(), ResolveError> {
    a.append(FileCategory::TaskingCommon, TASKING_KERNEL.iter().copied())?;
    // Some boards already list it at the minimal level.
    a.append_if_absent(FileCategory::TaskingArch, "s-bbpara.ads");
    a.append(FileCategory::TaskingBsp, ["a-intnam.ads"])?;
    Ok(())
}

fn full(a: &mut Amendment<'_>) -> Result<(), ResolveError> {
    a.append(
        FileCategory::TaskingCommon,
        EXCEPTION_PROPAGATION.iter().copied(),
    )?;

    let excmac = if a.predicates().uses_zcx {
        "s-excmac-arm.ads"
    } else {
        "s-excmac-gcc.ads"
    };
    a.substitute([("s-excmac.ads", excmac)]);
    Ok(())
}
