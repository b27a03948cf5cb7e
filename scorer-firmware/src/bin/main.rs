// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types mit DMA-Buffern
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

// Embassy Async Runtime
use defmt::info;
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};

// ESP32-C6 HAL
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Input, InputConfig, Pull};
use esp_hal::timer::timg::TimerGroup;

// Backtrace bei Panic und println!() Support
use {esp_backtrace as _, esp_println as _};

// Projekt-Module und Konfiguration
use pingpong_scorer::config::{BUTTON_PLAYER1_PIN, BUTTON_PLAYER2_PIN, LED_COUNT, LED_GPIO_PIN};
use pingpong_scorer::tasks::scoreboard_task;

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
// Ohne diesen schlägt das Flashen mit "ESP-IDF App Descriptor missing" fehl
esp_bootloader_esp_idf::esp_app_desc!();

/// Main Entry Point
///
/// Initialisiert Hardware, startet Embassy Runtime und spawnt den
/// Scoreboard-Task. Danach schläft main() - alle Arbeit läuft im Task.
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // ESP32-C6 Konfiguration: CPU auf maximale Taktfrequenz (160 MHz)
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Embassy Runtime initialisieren (Timer + Software Interrupt)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    info!("=== Ping Pong Scorer ===");
    info!(
        "Strip: {} LEDs on GPIO{} | Buttons: GPIO{} (P1), GPIO{} (P2)",
        LED_COUNT, LED_GPIO_PIN, BUTTON_PLAYER1_PIN, BUTTON_PLAYER2_PIN
    );

    // Tasten verbinden Pin mit GND -> Pull-Up, gedrückt = low
    let button_config = InputConfig::default().with_pull(Pull::Up);
    // Pins müssen zu BUTTON_PLAYER1_PIN / BUTTON_PLAYER2_PIN in config.rs passen
    let button1 = Input::new(peripherals.GPIO15, button_config);
    let button2 = Input::new(peripherals.GPIO12, button_config);

    // Spawn Scoreboard Task (Strip + Tasten + Control-Loop)
    spawner
        .spawn(scoreboard_task(
            peripherals.GPIO16, // LED_GPIO_PIN
            peripherals.RMT,
            button1,
            button2,
        ))
        .unwrap();

    // Main-Loop: schläft (alle Arbeit läuft im Task)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
