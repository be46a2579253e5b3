//! 64-bit ARM boards. Only the minimal runtime is shipped for these.

use crate::boards::base;
use crate::core::{Board, FeaturePredicates, FileCategory, Layer};

const AARCH64_ELF: &str = "aarch64-elf";

fn predicates() -> FeaturePredicates {
    FeaturePredicates::bareboard()
        .with_fpu(true, true)
        .with_mem_routines(true)
        .with_zcx(true)
}

fn aarch64() -> Layer {
    Layer::family("aarch64", 1).on_minimal(|a| {
        a.substitute([("system.ads", "system-xi-aarch64.ads")]);
        Ok(())
    })
}

pub fn rpi3() -> Board {
    Board::new("rpi3", AARCH64_ELF, predicates())
        .with_layer(base::layer())
        .with_layer(aarch64())
        .with_layer(Layer::board("rpi3").on_minimal(|a| {
            a.append(
                FileCategory::Bsp,
                [
                    "aarch64/rpi3/ram.ld",
                    "aarch64/rpi3/start-ram.S",
                    "aarch64/rpi3/trap_dump.ads",
                    "aarch64/rpi3/trap_dump.adb",
                    "i-raspberry_pi.ads",
                ],
            )?;
            // Same mini UART as the Pi 2.
            a.substitute([
                ("s-textio.adb", "s-textio-rpi2.adb"),
                ("s-macres.adb", "s-macres-rpi2.adb"),
            ]);
            a.load_config("runtime.xml", "aarch64/rpi3/runtime.xml")
        }))
}

pub fn qemu() -> Board {
    Board::new("aarch64-qemu", AARCH64_ELF, predicates())
        .with_layer(base::layer())
        .with_layer(aarch64())
        .with_layer(Layer::board("aarch64-qemu").on_minimal(|a| {
            a.append(
                FileCategory::Bsp,
                [
                    "aarch64/qemu/ram.ld",
                    "aarch64/qemu/mcpart.ld",
                    "aarch64/qemu/start-ram.S",
                    "aarch64/qemu/start-part.S",
                ],
            )?;
            a.substitute([
                ("s-textio.adb", "s-textio-zynq.adb"),
                ("s-macres.adb", "s-macres-zynq.adb"),
            ]);
            a.load_config("runtime.xml", "aarch64/qemu/runtime.xml")
        }))
}
