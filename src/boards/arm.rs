//! 32-bit ARM boards: the Cortex-M microcontrollers and the Cortex-A/R
//! boards.

use crate::boards::base;
use crate::core::{Amendment, Board, FeaturePredicates, FileCategory, Layer, Profile};
use crate::resolver::ResolveError;

const ARM_EABI: &str = "arm-eabi";

/// Linker token rewritten when the full runtime links against newlib.
pub(crate) const NOLIBC: &str = "\"-nolibc\", ";
pub(crate) const WITH_LIBC: &str = "\"-lc\", \"-lgnat\", ";

fn arm_predicates() -> FeaturePredicates {
    FeaturePredicates::bareboard()
        .with_mem_routines(true)
        .with_libc(false)
        .with_zcx(true)
}

/// Link the full runtime against newlib.
fn link_newlib(a: &mut Amendment<'_>) -> Result<(), ResolveError> {
    a.append(FileCategory::Common, ["newlib-bb.c"])?;
    a.edit_config("runtime.xml", NOLIBC, WITH_LIBC)
}

// ----------------------------------------------------------------------
// Cortex-M
// ----------------------------------------------------------------------

fn cortex_m() -> Layer {
    Layer::family("cortex-m", 1)
        .on_minimal(|a| {
            a.substitute([
                ("system.ads", "system-xi-arm.ads"),
                ("s-macres.adb", "s-macres-cortexm3.adb"),
            ]);
            Ok(())
        })
        .on_restricted(|a| {
            a.substitute([
                ("system.ads", "system-xi-cortexm4-sfp.ads"),
                ("s-bbcppr.adb", "s-bbcppr-armv7m.adb"),
                ("s-bbbosu.adb", "s-bbbosu-armv7m.adb"),
                ("s-parame.ads", "s-parame-xi-small.ads"),
            ]);
            Ok(())
        })
        .on_full(|a| {
            a.substitute([
                ("system.ads", "system-xi-cortexm4-full.ads"),
                ("s-traceb.adb", "s-traceb-xi-armeabi.adb"),
            ]);
            link_newlib(a)
        })
}

pub fn lm3s() -> Board {
    // No FPU, but the float attribute packages are still built.
    let predicates = arm_predicates().with_soft_fp_attributes();

    Board::new("lm3s", ARM_EABI, predicates)
        .with_layer(base::layer())
        .with_layer(cortex_m())
        .with_layer(Layer::board("lm3s").on_minimal(|a| {
            a.append(
                FileCategory::Arch,
                [
                    "arm/lm3s/lm3s-rom.ld",
                    "arm/lm3s/lm3s-ram.ld",
                    "arm/lm3s/start-rom.S",
                    "arm/lm3s/start-ram.S",
                    "arm/lm3s/setup_pll.adb",
                    "arm/lm3s/setup_pll.ads",
                ],
            )?;
            a.substitute([("s-textio.adb", "s-textio-lm3s.adb")]);
            a.load_config("runtime.xml", "arm/lm3s/runtime.xml")
        }))
}

/// Map an STM32 board to its MCU directory.
fn stm32_mcu(board: &str) -> Option<&'static str> {
    match board {
        "stm32f4" => Some("stm32f40x"),
        "stm32f429disco" => Some("stm32f429x"),
        "stm32f469disco" => Some("stm32f469x"),
        "stm32f7disco" => Some("stm32f7x"),
        "stm32f769disco" => Some("stm32f7x9"),
        _ => None,
    }
}

pub const STM32_BOARDS: [&str; 5] = [
    "stm32f4",
    "stm32f429disco",
    "stm32f469disco",
    "stm32f7disco",
    "stm32f769disco",
];

pub fn stm32(id: &'static str) -> Option<Board> {
    let mcu = stm32_mcu(id)?;
    let predicates = arm_predicates().with_fpu(true, mcu == "stm32f7x9");

    let board = Board::new(id, ARM_EABI, predicates)
        .with_max_profile(Profile::FullTasking)
        .with_layer(base::layer())
        .with_layer(cortex_m())
        .with_layer(
            Layer::board(id)
                .on_minimal(move |a| stm32_minimal(a, mcu))
                .on_restricted(move |a| {
                    a.remove(FileCategory::TaskingCommon, "s-bb.ads")?;
                    a.append(FileCategory::TaskingCommon, ["s-bbsumu.adb"])?;
                    a.append(FileCategory::Bsp, [format!("arm/stm32/{}/svd/handler.S", mcu)])?;
                    a.substitute([("a-intnam.ads", format!("arm/stm32/{}/svd/a-intnam.ads", mcu))]);
                    Ok(())
                }),
        );
    Some(board)
}

fn stm32_minimal(a: &mut Amendment<'_>, mcu: &str) -> Result<(), ResolveError> {
    a.append(FileCategory::Common, ["s-bb.ads"])?;
    a.append_if_absent(FileCategory::TaskingArch, "s-bbpara.ads");

    a.append(
        FileCategory::Bsp,
        [
            "s-stm32.ads",
            "s-stm32.adb",
            "arm/stm32/common-RAM.ld",
            "arm/stm32/common-ROM.ld",
            "arm/stm32/start-rom.S",
            "arm/stm32/start-ram.S",
            "arm/stm32/start-common.S",
            "arm/stm32/setup_pll.adb",
            "arm/stm32/setup_pll.ads",
        ],
    )?;
    a.append(
        FileCategory::Bsp,
        [
            "memory-map.ld",
            "s-bbmcpa.ads",
            "s-bbmcpa.adb",
            "s-bbbopa.ads",
            "svd/i-stm32.ads",
            "svd/i-stm32-flash.ads",
            "svd/i-stm32-gpio.ads",
            "svd/i-stm32-pwr.ads",
            "svd/i-stm32-rcc.ads",
            "svd/i-stm32-syscfg.ads",
            "svd/i-stm32-usart.ads",
        ]
        .map(|f| format!("arm/stm32/{}/{}", mcu, f)),
    )?;

    a.substitute([("s-bbpara.ads", "s-bbpara-stm32f4.ads")]);
    let (stm32, textio) = match mcu {
        "stm32f40x" => ("s-stm32-f40x.adb", "s-textio-stm32f4.adb"),
        "stm32f429x" => ("s-stm32-f4x9x.adb", "s-textio-stm32f4.adb"),
        "stm32f469x" => ("s-stm32-f4x9x.adb", "s-textio-stm32f469.adb"),
        _ => ("s-stm32-f7x.adb", "s-textio-stm32f7.adb"),
    };
    a.substitute([("s-stm32.adb", stm32), ("s-textio.adb", textio)]);

    let mut edits = Vec::new();
    if mcu.starts_with("stm32f7") {
        edits.push(("cortex-m4", "cortex-m7"));
    }
    if a.predicates().has_double_precision_fpu {
        edits.push(("fpv4-sp-d16", "fpv5-d16"));
    } else if mcu == "stm32f7x" {
        edits.push(("fpv4-sp-d16", "fpv5-sp-d16"));
    }
    a.load_config_with("runtime.xml", "arm/stm32/runtime.xml", edits)
}

pub const SAM_BOARDS: [&str; 2] = ["sam4s", "samg55"];

pub fn sam(id: &'static str) -> Option<Board> {
    if !SAM_BOARDS.contains(&id) {
        return None;
    }
    let predicates = arm_predicates().with_fpu(id != "sam4s", false);

    let board = Board::new(id, ARM_EABI, predicates)
        .with_max_profile(Profile::FullTasking)
        .with_layer(base::layer())
        .with_layer(cortex_m())
        .with_layer(
            Layer::board(id)
                .on_minimal(move |a| {
                    a.append(
                        FileCategory::Bsp,
                        [
                            "s-sam4s.ads",
                            "arm/sam/common-SAMBA.ld",
                            "arm/sam/common-ROM.ld",
                            "arm/sam/start-rom.S",
                            "arm/sam/start-ram.S",
                            "arm/sam/setup_pll.ads",
                        ],
                    )?;
                    a.append(
                        FileCategory::Bsp,
                        [
                            "board_config.ads",
                            "setup_pll.adb",
                            "memory-map.ld",
                            "svd/i-sam.ads",
                            "svd/i-sam-efc.ads",
                            "svd/i-sam-pmc.ads",
                            "svd/i-sam-sysc.ads",
                        ]
                        .map(|f| format!("arm/sam/{}/{}", id, f)),
                    )?;
                    a.substitute([("s-textio.adb", "s-textio-sam4s.adb")]);

                    let fp = a.predicates().float_abi();
                    a.load_config("runtime.xml", &format!("arm/sam/{}float/runtime.xml", fp))
                })
                .on_restricted(move |a| {
                    a.append(
                        FileCategory::Bsp,
                        ["svd/handler.S", "s-bbbopa.ads", "s-bbmcpa.ads"]
                            .map(|f| format!("arm/sam/{}/{}", id, f)),
                    )?;
                    a.substitute([
                        ("a-intnam.ads", format!("arm/sam/{}/svd/a-intnam.ads", id)),
                        ("s-bbpara.ads", "s-bbpara-sam4s.ads".to_string()),
                    ]);
                    Ok(())
                }),
        );
    Some(board)
}

// ----------------------------------------------------------------------
// Cortex-A/R
// ----------------------------------------------------------------------

fn cortex_ar_predicates() -> FeaturePredicates {
    arm_predicates().with_fpu(true, true)
}

fn cortex_ar() -> Layer {
    Layer::family("cortex-ar", 1)
        .on_minimal(|a| {
            a.substitute([("system.ads", "system-xi-arm.ads")]);
            Ok(())
        })
        .on_restricted(|a| {
            a.append(FileCategory::TaskingCommon, ["s-bbcpsp.ads"])?;
            a.substitute([
                ("system.ads", "system-xi-arm-sfp.ads"),
                ("s-bbcppr.adb", "s-bbcppr-arm.adb"),
                ("s-bbcpsp.ads", "s-bbcpsp-arm.ads"),
            ]);
            Ok(())
        })
        .on_full(|a| {
            a.substitute([
                ("system.ads", "system-xi-arm-full.ads"),
                ("s-traceb.adb", "s-traceb-xi-armeabi.adb"),
            ]);
            link_newlib(a)
        })
}

pub fn tms570() -> Board {
    Board::new("tms570", ARM_EABI, cortex_ar_predicates())
        .with_max_profile(Profile::FullTasking)
        .with_layer(base::layer())
        .with_layer(cortex_ar())
        .with_layer(
            Layer::board("tms570")
                .on_minimal(|a| {
                    a.append(
                        FileCategory::Bsp,
                        [
                            "arm/tms570/sys_startup.S",
                            "arm/tms570/crt0.S",
                            "arm/tms570/start-ram.S",
                            "arm/tms570/start-rom.S",
                        ],
                    )?;
                    a.append(
                        FileCategory::Arch,
                        [
                            "arm/tms570/tms570.ld",
                            "arm/tms570/flash.ld",
                            "arm/tms570/monitor.ld",
                            "arm/tms570/hiram.ld",
                            "arm/tms570/loram.ld",
                            "arm/tms570/common.ld",
                        ],
                    )?;
                    a.substitute([
                        ("s-textio.adb", "s-textio-tms570.adb"),
                        ("s-macres.adb", "s-macres-tms570.adb"),
                    ]);
                    a.load_config("runtime.xml", "arm/tms570/runtime.xml")
                })
                .on_restricted(|a| {
                    a.append(FileCategory::TaskingCommon, ["s-bbsumu.adb"])?;
                    a.substitute([
                        ("a-intnam.ads", "a-intnam-xi-tms570.ads"),
                        ("s-bbbosu.adb", "s-bbbosu-tms570.adb"),
                        ("s-bbpara.ads", "s-bbpara-tms570.ads"),
                        ("s-parame.ads", "s-parame-xi-small.ads"),
                    ]);
                    Ok(())
                }),
        )
}

pub fn zynq7000() -> Board {
    Board::new("zynq7000", ARM_EABI, cortex_ar_predicates())
        .with_max_profile(Profile::FullTasking)
        .with_layer(base::layer())
        .with_layer(cortex_ar())
        .with_layer(
            Layer::board("zynq7000")
                .on_minimal(|a| {
                    a.append(
                        FileCategory::Bsp,
                        ["arm/zynq/ram.ld", "arm/zynq/start-ram.S", "arm/zynq/memmap.s"],
                    )?;
                    a.substitute([
                        ("s-textio.adb", "s-textio-zynq.adb"),
                        ("s-macres.adb", "s-macres-zynq.adb"),
                    ]);
                    a.load_config("runtime.xml", "arm/zynq/runtime.xml")
                })
                .on_restricted(|a| {
                    a.substitute([
                        ("system.ads", "system-xi-cortexa-sfp.ads"),
                        ("a-intnam.ads", "a-intnam-dummy.ads"),
                        ("s-bbbosu.adb", "s-bbbosu-cortexa9.adb"),
                        ("s-bbtime.adb", "s-bbtime-ppc.adb"),
                        ("s-bbpara.ads", "s-bbpara-cortexa9.ads"),
                    ]);
                    Ok(())
                })
                .on_full(|a| {
                    a.substitute([("system.ads", "system-xi-cortexa-full.ads")]);
                    Ok(())
                }),
        )
}

pub fn rpi2() -> Board {
    Board::new("rpi2", ARM_EABI, cortex_ar_predicates())
        .with_max_profile(Profile::RestrictedTasking)
        .with_layer(base::layer())
        .with_layer(cortex_ar())
        .with_layer(
            Layer::board("rpi2")
                .on_minimal(|a| {
                    a.append(
                        FileCategory::Bsp,
                        [
                            "arm/rpi2/ram.ld",
                            "arm/rpi2/start-ram.S",
                            "arm/rpi2/memmap.s",
                            "i-raspberry_pi.ads",
                            "i-arm_v7ar.ads",
                            "i-arm_v7ar.adb",
                        ],
                    )?;
                    a.substitute([
                        ("s-textio.adb", "s-textio-rpi2.adb"),
                        ("s-macres.adb", "s-macres-rpi2.adb"),
                    ]);
                    a.load_config("runtime.xml", "arm/rpi2/runtime.xml")
                })
                .on_restricted(|a| {
                    a.substitute([
                        ("a-intnam.ads", "a-intnam-dummy.ads"),
                        ("s-bbbosu.adb", "s-bbbosu-rpi2.adb"),
                        ("s-bbtime.adb", "s-bbtime-ppc.adb"),
                        ("s-bbpara.ads", "s-bbpara-rpi2.ads"),
                    ]);
                    Ok(())
                }),
        )
}
