#![no_std]
#![no_main]

use cortex_m::delay::Delay;
use panic_halt as _;
use rp_pico::entry;
use rp_pico::hal::{
    Clock, Sio, Timer, clocks::init_clocks_and_plls, pac, pio::PIOExt, watchdog::Watchdog,
};
use rtt_target::{rprintln, rtt_init_print};
use ws2812_pio::Ws2812;

use rp_pico_demos::strip::SmartStrip;
use rp_pico_demos::time::{Duration, HardwareTimer, Instant};

use vehicle_lights::{
    BootMode, InputSampler, LightsConfig, PinAssignment, PinSampler, PixelBuffer,
    SignalController,
};

/// Strip length of the reference harness
pub const NUM_LEDS: usize = 32;

/// Wiring of the reference harness
pub const WIRING: PinAssignment = PinAssignment::GENERIC;

// rp-hal pins are typed, so the GPIOs below are chosen at compile time
const _: () = assert!(
    WIRING.led_data == 2
        && WIRING.back == 10
        && WIRING.stop == 9
        && WIRING.left == 8
        && WIRING.right == 7
);

/// Frame pacing; the chevron timing comes from the config, not from this
pub const FRAME_DELAY_MS: u32 = 2;

#[entry]
fn main() -> ! {
    rtt_init_print!();
    rprintln!("=== Vehicle Lights (RP Pico) ===");

    let mut pac = pac::Peripherals::take().unwrap();
    let core = pac::CorePeripherals::take().unwrap();

    let mut watchdog = Watchdog::new(pac.WATCHDOG);

    let clocks = init_clocks_and_plls(
        rp_pico::XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    let sio = Sio::new(pac.SIO);
    let pins = rp_pico::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    let config = LightsConfig::<Duration>::builder()
        .pins(WIRING)
        .build()
        .unwrap();
    let assignment = config.pins();
    rprintln!(
        "data GPIO{}, back GPIO{}, stop GPIO{}, left GPIO{}, right GPIO{}",
        assignment.led_data,
        assignment.back,
        assignment.stop,
        assignment.left,
        assignment.right
    );

    // Signal lines are driven high when active
    let mut sampler = PinSampler::new(
        pins.gpio10.into_pull_down_input(),
        pins.gpio9.into_pull_down_input(),
        pins.gpio8.into_pull_down_input(),
        pins.gpio7.into_pull_down_input(),
        config.active_level(),
    );

    let timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
    let time_source = HardwareTimer::new(timer);

    let (mut pio, sm0, _, _, _) = pac.PIO0.split(&mut pac.RESETS);
    let driver = Ws2812::new(
        pins.gpio2.into_function(),
        &mut pio,
        sm0,
        clocks.peripheral_clock.freq(),
        timer.count_down(),
    );
    let mut strip = SmartStrip::new(driver);

    let mut delay = Delay::new(core.SYST, clocks.system_clock.freq().to_Hz());

    let mode = BootMode::select(&sampler.sample(), &config);
    rprintln!("Boot mode: {:?}", mode);

    if mode == BootMode::Update {
        // No radio on this board: show the entry frame and wait for a reset
        let mut buffer = PixelBuffer::<NUM_LEDS>::new();
        mode.render_entry(&mut buffer, &config);
        buffer.flush(&mut strip, mode.brightness(&config));
        loop {
            cortex_m::asm::wfi();
        }
    }

    let mut controller: SignalController<Instant, _, HardwareTimer, NUM_LEDS> =
        SignalController::new(strip, &time_source, config).unwrap();

    rprintln!("=== Hardware Ready ===");

    loop {
        let report = controller.run_frame(&mut sampler);
        if report.cleared {
            rprintln!("inputs: {:?}", controller.state().previous_inputs());
        }
        delay.delay_ms(FRAME_DELAY_MS);
    }
}
