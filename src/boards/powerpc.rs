//! PowerPC boards: the classic 6xx/7xx cores and the e500/e200 SPE cores.

use crate::boards::base;
use crate::core::{Amendment, Board, FeaturePredicates, FileCategory, Layer, Profile};
use crate::resolver::ResolveError;

fn predicates() -> FeaturePredicates {
    FeaturePredicates::bareboard()
        .with_fpu(true, true)
        .with_mem_routines(true)
        .with_libc(true)
        .with_zcx(false)
}

/// Generate the zero-cost-exception link spec and rewrite `pattern` in
/// runtime.xml to pull in the runtime libraries through it.
fn link_zcx(a: &mut Amendment<'_>, pattern: &str, lead: &str) -> Result<(), ResolveError> {
    a.load_config("link-zcx.spec", "powerpc/prep/link-zcx.spec")?;
    let replacement = format!(
        "{}\n         \"-lgnat\", \"-lgcc\", \"-lgnat\",\n         \"--specs=${{RUNTIME_DIR(ada)}}/link-zcx.spec\"",
        lead
    );
    a.edit_config("runtime.xml", pattern, replacement)
}

/// Minimal-level files for boards whose console driver needs `s-bbbopa`.
fn uart_board_support(a: &mut Amendment<'_>) -> Result<(), ResolveError> {
    a.append(FileCategory::Common, ["s-bb.ads"])?;
    a.append(FileCategory::Bsp, ["s-bbbopa.ads"])
}

// ----------------------------------------------------------------------
// 6xx
// ----------------------------------------------------------------------

fn ppc6xx() -> Layer {
    Layer::family("powerpc-6xx", 1)
        .on_minimal(|a| {
            a.substitute([
                ("system.ads", "system-xi-ppc.ads"),
                ("s-lidosq.adb", "s-lidosq-ada.adb"),
                ("s-lisisq.adb", "s-lisisq-ada.adb"),
            ]);
            Ok(())
        })
        .on_restricted(|a| {
            a.append(
                FileCategory::TaskingCommon,
                [
                    "powerpc/6xx/context_switch.S",
                    "powerpc/6xx/handler.S",
                    "s-bbcpsp.ads",
                    "s-bbcpsp.adb",
                ],
            )?;
            a.substitute([
                ("system.ads", "system-xi-ppc-sfp.ads"),
                ("s-bbcppr.adb", "s-bbcppr-ppc.adb"),
                ("s-bbcppr.ads", "s-bbcppr-ppc.ads"),
                ("s-bbinte.adb", "s-bbinte-ppc.adb"),
                ("s-bbtime.adb", "s-bbtime-ppc.adb"),
                ("s-bbcpsp.ads", "s-bbcpsp-6xx.ads"),
                ("s-bbcpsp.adb", "s-bbcpsp-6xx.adb"),
            ]);
            Ok(())
        })
        .on_full(|a| {
            a.substitute([
                ("system.ads", "system-xi-ppc-full.ads"),
                ("s-traceb.adb", "s-traceb-xi-ppc.adb"),
            ]);
            Ok(())
        })
}

pub fn mpc8641() -> Board {
    Board::new("mpc8641", "powerpc-elf", predicates())
        .with_max_profile(Profile::FullTasking)
        .with_layer(base::layer())
        .with_layer(ppc6xx())
        .with_layer(
            Layer::board("mpc8641")
                .on_minimal(|a| {
                    a.append(
                        FileCategory::Arch,
                        ["powerpc/8641d/qemu-rom.ld", "powerpc/8641d/ram.ld"],
                    )?;
                    a.append(
                        FileCategory::Bsp,
                        ["powerpc/8641d/start-rom.S", "powerpc/8641d/setup.S"],
                    )?;
                    uart_board_support(a)?;
                    a.substitute([
                        ("s-macres.adb", "s-macres-p2020.adb"),
                        ("s-bbbopa.ads", "s-bbbopa-8641d.ads"),
                        ("s-textio.adb", "s-textio-p2020.adb"),
                    ]);
                    a.load_config("runtime.xml", "powerpc/8641d/runtime.xml")
                })
                .on_restricted(|a| {
                    a.remove(FileCategory::TaskingCommon, "s-bb.ads")?;
                    a.append(FileCategory::TaskingCommon, ["s-bbsuti.adb", "s-bbsumu.adb"])?;
                    a.substitute([
                        ("s-bbbosu.adb", "s-bbbosu-ppc-openpic.adb"),
                        ("s-bbsuti.adb", "s-bbsuti-ppc.adb"),
                        ("s-bbsumu.adb", "s-bbsumu-8641d.adb"),
                        ("s-bbpara.ads", "s-bbpara-8641d.ads"),
                        ("a-intnam.ads", "a-intnam-xi-ppc-openpic.ads"),
                    ]);
                    Ok(())
                })
                .on_full(|a| link_zcx(a, "\"-nolibc\"", "\"-nolibc\",")),
        )
}

pub fn mpc8349e() -> Board {
    Board::new("8349e", "powerpc-elf", predicates())
        .with_max_profile(Profile::RestrictedTasking)
        .with_layer(base::layer())
        .with_layer(ppc6xx())
        .with_layer(
            Layer::board("8349e")
                .on_minimal(|a| {
                    a.append(FileCategory::Arch, ["powerpc/8349e/ram.ld"])?;
                    a.append(
                        FileCategory::Bsp,
                        ["powerpc/8349e/start-ram.S", "powerpc/8349e/setup.S"],
                    )?;
                    uart_board_support(a)?;
                    a.substitute([
                        ("s-macres.adb", "s-macres-8349e.adb"),
                        ("s-bbbopa.ads", "s-bbbopa-8349e.ads"),
                        ("s-textio.adb", "s-textio-p2020.adb"),
                    ]);
                    a.load_config("runtime.xml", "powerpc/8349e/runtime.xml")
                })
                .on_restricted(|a| {
                    a.remove(FileCategory::TaskingCommon, "s-bb.ads")?;
                    a.substitute([
                        ("s-bbbosu.adb", "s-bbbosu-8349e.adb"),
                        ("s-bbpara.ads", "s-bbpara-ppc.ads"),
                        ("a-intnam.ads", "a-intnam-xi-8349e.ads"),
                    ]);
                    Ok(())
                }),
        )
}

// ----------------------------------------------------------------------
// SPE
// ----------------------------------------------------------------------

const EABISPE: &str = "powerpc-eabispe";

fn spe() -> Layer {
    Layer::family("powerpc-spe", 1)
        .on_minimal(|a| {
            a.substitute([
                ("system.ads", "system-xi-e500v2.ads"),
                ("s-lidosq.adb", "s-lidosq-ada.adb"),
                ("s-lisisq.adb", "s-lisisq-ada.adb"),
            ]);
            Ok(())
        })
        .on_restricted(|a| {
            a.append(
                FileCategory::TaskingCommon,
                [
                    "powerpc/spe/handler.S",
                    "powerpc/spe/context_switch.S",
                    "s-bbcpsp.ads",
                    "s-bbcpsp.adb",
                ],
            )?;
            a.substitute([
                ("system.ads", "system-xi-e500v2-sfp.ads"),
                ("s-bbcppr.adb", "s-bbcppr-ppc.adb"),
                ("s-bbcppr.ads", "s-bbcppr-ppc.ads"),
                ("s-bbinte.adb", "s-bbinte-ppc.adb"),
                ("s-bbtime.adb", "s-bbtime-ppc.adb"),
                ("s-bbcpsp.ads", "s-bbcpsp-spe.ads"),
                ("s-bbcpsp.adb", "s-bbcpsp-spe.adb"),
            ]);
            Ok(())
        })
        .on_full(|a| {
            a.substitute([
                ("system.ads", "system-xi-e500v2-full.ads"),
                ("s-traceb.adb", "s-traceb-xi-ppc.adb"),
            ]);
            Ok(())
        })
}

pub fn p2020() -> Board {
    Board::new("p2020", EABISPE, predicates())
        .with_max_profile(Profile::FullTasking)
        .with_layer(base::layer())
        .with_layer(spe())
        .with_layer(
            Layer::board("p2020")
                .on_minimal(|a| {
                    a.append(FileCategory::Arch, ["powerpc/p2020/p2020.ld"])?;
                    a.append(
                        FileCategory::Bsp,
                        ["powerpc/p2020/start-ram.S", "powerpc/p2020/setup.S"],
                    )?;
                    uart_board_support(a)?;
                    a.substitute([
                        ("s-macres.adb", "s-macres-p2020.adb"),
                        ("s-bbbopa.ads", "s-bbbopa-p2020.ads"),
                        ("s-textio.adb", "s-textio-p2020.adb"),
                    ]);
                    a.load_config("runtime.xml", "powerpc/p2020/runtime.xml")
                })
                .on_restricted(|a| {
                    a.remove(FileCategory::TaskingCommon, "s-bb.ads")?;
                    a.append(FileCategory::TaskingCommon, ["s-bbsuti.adb", "s-bbsumu.adb"])?;
                    a.substitute([
                        ("s-bbbosu.adb", "s-bbbosu-ppc-openpic.adb"),
                        ("s-bbsuti.adb", "s-bbsuti-ppc.adb"),
                        ("s-bbpara.ads", "s-bbpara-ppc.ads"),
                        ("a-intnam.ads", "a-intnam-xi-ppc-openpic.ads"),
                    ]);
                    Ok(())
                })
                .on_full(|a| link_zcx(a, "\"-nolibc\"", "\"-nolibc\",")),
        )
}

pub fn p5566() -> Board {
    Board::new("p5566", EABISPE, predicates())
        .with_max_profile(Profile::FullTasking)
        .with_layer(base::layer())
        .with_layer(spe())
        .with_layer(
            Layer::board("p5566")
                .on_minimal(|a| {
                    a.append(
                        FileCategory::Arch,
                        [
                            "powerpc/p5566/bam.ld",
                            "powerpc/p5566/flash.ld",
                            "powerpc/p5566/ram.ld",
                        ],
                    )?;
                    a.append(
                        FileCategory::Bsp,
                        [
                            "powerpc/p5566/start-bam.S",
                            "powerpc/p5566/start-ram.S",
                            "powerpc/p5566/start-flash.S",
                            "powerpc/p5566/setup.S",
                            "powerpc/p5566/setup-pll.S",
                        ],
                    )?;
                    a.substitute([
                        ("s-macres.adb", "s-macres-p55.adb"),
                        ("s-textio.adb", "s-textio-p55.adb"),
                    ]);
                    a.load_config("runtime.xml", "powerpc/p5566/runtime.xml")
                })
                .on_restricted(|a| {
                    a.append(FileCategory::TaskingBsp, ["s-bbbopa.ads"])?;
                    a.append(FileCategory::TaskingCommon, ["s-bbsuti.adb", "s-bbsumu.adb"])?;
                    a.substitute([
                        ("s-bbbopa.ads", "s-bbbopa-p55.ads"),
                        ("s-bbbosu.adb", "s-bbbosu-p55.adb"),
                        ("s-bbsuti.adb", "s-bbsuti-ppc.adb"),
                        ("s-bbpara.ads", "s-bbpara-p55.ads"),
                        ("a-intnam.ads", "a-intnam-xi-p55.ads"),
                    ]);
                    Ok(())
                })
                .on_full(|a| link_zcx(a, " \"-nostartfiles\"", "")),
        )
}

pub fn mpc5634() -> Board {
    Board::new("mpc5634", EABISPE, predicates())
        .with_layer(base::layer())
        .with_layer(spe())
        .with_layer(Layer::board("mpc5634").on_minimal(|a| {
            a.append(FileCategory::Arch, ["powerpc/mpc5634/5634.ld"])?;
            a.append(FileCategory::Bsp, ["powerpc/mpc5634/start.S"])?;
            a.substitute([
                ("s-macres.adb", "s-macres-p55.adb"),
                ("s-textio.adb", "s-textio-p55.adb"),
            ]);
            a.load_config("runtime.xml", "powerpc/mpc5634/runtime.xml")
        }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BuiltinTemplates;
    use crate::resolver::resolve;

    #[test]
    fn test_p2020_full_link_spec() {
        let m = resolve(&p2020(), Profile::FullTasking, &BuiltinTemplates).unwrap();
        let xml = m.config("runtime.xml").unwrap();
        assert!(xml.contains("\"-nolibc\",\n         \"-lgnat\", \"-lgcc\", \"-lgnat\","));
        assert!(xml.contains("--specs=${RUNTIME_DIR(ada)}/link-zcx.spec"));
        assert!(m.config("link-zcx.spec").is_some());
        assert_eq!(m.substitution("system.ads"), Some("system-xi-e500v2-full.ads"));
    }

    #[test]
    fn test_p5566_drops_nostartfiles() {
        let m = resolve(&p5566(), Profile::FullTasking, &BuiltinTemplates).unwrap();
        let xml = m.config("runtime.xml").unwrap();
        assert!(!xml.contains("-nostartfiles"));
        assert!(xml.contains("-lgcc"));
        assert_eq!(m.files(FileCategory::TaskingBsp), ["a-intnam.ads", "s-bbbopa.ads"]);
    }

    #[test]
    fn test_libc_support_files() {
        let m = resolve(&mpc5634(), Profile::Minimal, &BuiltinTemplates).unwrap();
        assert!(m.files(FileCategory::Common).contains(&"s-cmallo.ads".to_string()));
        assert_eq!(m.substitution("s-lidosq.adb"), Some("s-lidosq-ada.adb"));
    }
}
