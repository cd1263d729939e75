fn main() {
    env_logger::init();
    run();
}

/// Windowed build: hand the machine to the winit/pixels host glue.
#[cfg(feature = "display")]
fn run() {
    if let Err(e) = riskpm::display::run() {
        eprintln!("display error: {e}");
        std::process::exit(1);
    }
}

/// Headless build: boot the stock demo, drive both cadences off a virtual
/// clock for a couple of seconds, then dump the sprite table.
#[cfg(not(feature = "display"))]
fn run() {
    use std::time::Duration;

    use riskpm::{Cartridge, Machine, PALETTE_TICK_PERIODS_MS, assets};

    const FRAME_US: u64 = 16_667;

    let image = assets::demo_image();
    let cart = Cartridge::from_bytes(&image).expect("failed to parse demo image");
    let mut machine = Machine::from_cartridge(&cart).expect("failed to boot machine");

    let layout = machine.vram().layout();
    println!("BOOTING RISK(TM) PICTURE MACHINE");
    println!("   ** RISK STATUS **");
    println!("+---------------------+");
    println!("|RISK MEM: {:<5}words |", layout.total_bytes() / 2);
    println!("|TILES:    {:<5}words |", layout.tile_segment_bytes() / 2);
    println!("|SPRITES:  {:<5}words |", layout.sprite_segment_bytes() / 2);
    println!("|PALETTES: {:<5}words |", layout.palette_segment_bytes() / 2);
    println!("|MAP:      {:<5}words |", layout.map_segment_bytes() / 2);
    println!("+---------------------+");

    // Fire each palette timer whenever its period elapses on the virtual
    // clock; every period is longer than a frame, so one check per frame
    // per slot suffices.
    let frame_dt = Duration::from_micros(FRAME_US);
    let mut deadlines_us = PALETTE_TICK_PERIODS_MS.map(|ms| ms * 1000);
    let mut now_us: u64 = 0;
    for _ in 0..120 {
        now_us += FRAME_US;
        for (slot, deadline) in deadlines_us.iter_mut().enumerate() {
            if now_us >= *deadline {
                machine.tick_palette(slot);
                *deadline += PALETTE_TICK_PERIODS_MS[slot] * 1000;
            }
        }
        machine.advance_frame(frame_dt);
    }

    println!();
    println!("after {} frames:", machine.animator().frame());
    for slot in 0..4 {
        let attr = machine.vram().sprite(slot);
        println!(
            "sprite {slot}: tile {:3} palette {:2} pos ({:3},{:3}) {:?}",
            attr.tile_id(),
            attr.palette_id(),
            attr.x(),
            attr.y(),
            attr.layer()
        );
    }

    #[cfg(feature = "screenshot")]
    {
        machine
            .save_screenshot("riskpm-demo.png")
            .expect("failed to write screenshot");
        println!("wrote riskpm-demo.png");
    }
}
