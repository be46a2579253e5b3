//! SPARC LEON boards.

use crate::boards::base;
use crate::core::{Amendment, Board, FeaturePredicates, FileCategory, Layer, Profile};
use crate::resolver::ResolveError;

/// Start-files token replaced by the zero-cost-exception link spec.
pub(crate) const NOSTARTFILES: &str = "\"-nostartfiles\",";
pub(crate) const ZCX_SPEC: &str = "\"--specs=${RUNTIME_DIR(ada)}/link-zcx.spec\",";

fn predicates() -> FeaturePredicates {
    FeaturePredicates::bareboard()
        .with_fpu(true, true)
        .with_mem_routines(true)
        .with_libc(false)
        .with_zcx(false)
}

fn sparc() -> Layer {
    Layer::family("sparc", 1)
        .on_minimal(sparc_minimal)
        .on_restricted(sparc_restricted)
        .on_full(sparc_full)
}

fn sparc_minimal(a: &mut Amendment<'_>) -> Result<(), ResolveError> {
    a.append(FileCategory::Common, ["sparc.h"])?;
    a.substitute([
        ("system.ads", "system-xi-sparc.ads"),
        ("s-macres.adb", "s-macres-leon.adb"),
        ("sparc.h", "sparc-bb.h"),
    ]);
    // The UART address lives in s-bbbopa, so the minimal runtime needs it too.
    a.append(FileCategory::Common, ["s-bb.ads"])?;
    a.append(FileCategory::Bsp, ["s-bbbopa.ads"])?;
    a.append_flags("c_flags", ["-DLEON"]);
    Ok(())
}

fn sparc_restricted(a: &mut Amendment<'_>) -> Result<(), ResolveError> {
    a.remove(FileCategory::TaskingCommon, "s-bb.ads")?;
    a.append(
        FileCategory::TaskingCommon,
        [
            "context_switch.S",
            "trap_handler.S",
            "interrupt_masking.S",
            "floating_point.S",
            "s-bcpith.adb",
            "s-bbcaco.ads",
            "s-bbcaco.adb",
        ],
    )?;
    a.substitute([
        ("system.ads", "system-xi-sparc-ravenscar.ads"),
        ("s-bbcppr.adb", "s-bbcppr-sparc.adb"),
        ("s-bcpith.adb", "s-bcpith-bb-sparc.adb"),
        ("context_switch.S", "context_switch-bb-sparc.S"),
        ("trap_handler.S", "trap_handler-bb-sparc.S"),
        ("interrupt_masking.S", "interrupt_masking-bb-sparc.S"),
        ("floating_point.S", "floating_point-bb-sparc.S"),
        ("s-bbcaco.adb", "s-bbcaco-leon.adb"),
        ("s-musplo.adb", "s-musplo-leon.adb"),
    ]);
    Ok(())
}

fn sparc_full(a: &mut Amendment<'_>) -> Result<(), ResolveError> {
    a.substitute([
        ("system.ads", "system-xi-sparc-full.ads"),
        ("s-traceb.adb", "s-traceb-xi-sparc.adb"),
    ]);
    a.append(FileCategory::Common, ["newlib-bb.c"])?;
    a.load_config("link-zcx.spec", "sparc/leon-zcx.specs")?;
    a.edit_config("runtime.xml", NOSTARTFILES, ZCX_SPEC)
}

pub fn leon2() -> Board {
    Board::new("leon2", "leon-elf", predicates())
        .with_max_profile(Profile::FullTasking)
        .with_layer(base::layer())
        .with_layer(sparc())
        .with_layer(
            Layer::board("leon2")
                .on_minimal(|a| {
                    a.append(FileCategory::Arch, ["leon-elf/leon.ld", "leon-elf/crt0.S"])?;
                    a.append(FileCategory::Bsp, ["sparc/leon/hw_init.S"])?;
                    a.substitute([
                        ("s-textio.adb", "s-textio-leon.adb"),
                        ("s-bbbopa.ads", "s-bbbopa-leon.ads"),
                    ]);
                    a.load_config("runtime.xml", "sparc/leon/runtime.xml")?;
                    a.append_flags("c_flags", ["-DLEON2"]);
                    Ok(())
                })
                .on_restricted(|a| {
                    a.append(FileCategory::TaskingCommon, ["s-bbsule.ads", "s-bbsumu.adb"])?;
                    a.substitute([
                        ("s-bbbosu.adb", "s-bbbosu-leon.adb"),
                        ("s-bbpara.ads", "s-bbpara-leon.ads"),
                        ("a-intnam.ads", "a-intnam-xi-leon.ads"),
                    ]);
                    Ok(())
                }),
        )
}

pub fn leon3() -> Board {
    Board::new("leon3", "leon3-elf", predicates())
        .with_max_profile(Profile::FullTasking)
        .with_layer(base::layer())
        .with_layer(sparc())
        .with_layer(
            Layer::board("leon3")
                .on_minimal(|a| {
                    a.append(FileCategory::Arch, ["leon3-elf/leon.ld", "leon-elf/crt0.S"])?;
                    a.append(FileCategory::Bsp, ["sparc/leon/hw_init.S"])?;
                    a.substitute([
                        ("s-textio.adb", "s-textio-leon3.adb"),
                        ("s-bbbopa.ads", "s-bbbopa-leon3.ads"),
                    ]);
                    a.load_config("runtime.xml", "sparc/leon3/runtime.xml")?;
                    a.append_flags("c_flags", ["-DLEON3"]);
                    Ok(())
                })
                .on_restricted(|a| {
                    a.append(FileCategory::TaskingCommon, ["s-bbsle3.ads"])?;
                    a.substitute([
                        ("s-bbbosu.adb", "s-bbbosu-leon3.adb"),
                        ("s-bbpara.ads", "s-bbpara-leon.ads"),
                        ("a-intnam.ads", "a-intnam-xi-leon3.ads"),
                    ]);
                    Ok(())
                })
                .on_full(|a| {
                    // Single precision sqrt is broken on the UT699.
                    a.substitute([("s-lisisq.adb", "s-lisisq-ada.adb")]);
                    Ok(())
                }),
        )
}
