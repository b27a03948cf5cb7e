// Scoreboard Task - Control-Loop: Tasten pollen, Spielstand führen, Strip rendern
use defmt::{error, info};
use embassy_time::{Duration, Instant, Timer};
use esp_hal::gpio::Input;
use esp_hal_smartled::smart_led_buffer;
use rgb::RGB8;

use crate::config::{
    DEBOUNCE_MS, LED_BRIGHTNESS, LED_COUNT, LONG_PRESS_MS, LOOP_INTERVAL_MS, NEW_GAME_PAUSE_MS,
    RESET_PAUSE_MS, RMT_CLOCK_MHZ, scoreboard_config,
};
use crate::hal::RmtStripWriter;
use scorer_core::{
    Controls, EventOutcome, FrameOutcome, Scoreboard, StripWriter, player_number,
};

/// Scoreboard Logic - Testbare Business Logic ohne Hardware-Abhängigkeit
///
/// Ein Durchlauf des Loops:
/// - Tasten-Pegel lesen und in Events übersetzen (Entprellung, Reset-Geste)
/// - Events an das Scoreboard geben und loggen
/// - Frame passend zur Phase rendern und auf den Strip flushen
/// - ~16 ms schlafen
///
/// # Trait-basierte Abstraktion
/// Der generische Parameter `W: StripWriter` ermöglicht:
/// - Real Hardware (RmtStripWriter) im Production-Code
/// - Mock Implementation (MockStripWriter) in Tests
///
/// # Parameter
/// - `strip`: Strip Writer (Hardware oder Mock)
/// - `read_buttons`: liefert die Tasten-Pegel, `true` = gedrückt
pub async fn scoreboard_logic<W: StripWriter>(
    mut strip: W,
    mut read_buttons: impl FnMut() -> [bool; 2],
) {
    let mut scoreboard = match Scoreboard::new(scoreboard_config()) {
        Ok(scoreboard) => scoreboard,
        Err(e) => {
            error!("Invalid scoreboard configuration: {}", e);
            return;
        }
    };
    let mut controls = Controls::new(DEBOUNCE_MS, LONG_PRESS_MS);
    let mut pixels = [RGB8::default(); LED_COUNT];

    play_startup(&mut strip, &scoreboard, &mut pixels).await;
    info!("{}", scoreboard.snapshot());
    info!("Ready! Press buttons to score.");

    loop {
        let now = Instant::now().as_millis();

        for event in controls.poll(read_buttons(), now) {
            match scoreboard.handle(event, now) {
                EventOutcome::Scored(player, outcome) => {
                    info!(
                        "Player {} scores! {} ({})",
                        player_number(player),
                        scoreboard.snapshot(),
                        outcome
                    );
                }
                EventOutcome::Undone(player) => {
                    info!(
                        "Point removed for Player {}: {}",
                        player_number(player),
                        scoreboard.snapshot()
                    );
                }
                EventOutcome::Reset => {
                    info!(">>> GAME RESET <<<");
                    blank(&mut strip, &scoreboard, &mut pixels);
                    Timer::after(Duration::from_millis(RESET_PAUSE_MS)).await;
                    play_startup(&mut strip, &scoreboard, &mut pixels).await;
                    info!("{}", scoreboard.snapshot());
                }
                EventOutcome::NewGame => {
                    info!(">>> NEW GAME <<<");
                    blank(&mut strip, &scoreboard, &mut pixels);
                    Timer::after(Duration::from_millis(NEW_GAME_PAUSE_MS)).await;
                    info!("{}", scoreboard.snapshot());
                }
                EventOutcome::Ignored => {}
            }
        }

        let frame = scoreboard.render_frame(Instant::now().as_millis(), &mut pixels);
        if let FrameOutcome::ServeHandover(player) = frame {
            info!("Serve now: Player {}", player_number(player));
        }
        flush(&mut strip, &pixels);

        // Async Delay: gibt CPU an andere Tasks zurück
        Timer::after(Duration::from_millis(LOOP_INTERVAL_MS)).await;
    }
}

/// Startup-Test abspielen (blockiert den Loop bis zum Ende)
async fn play_startup<W: StripWriter>(strip: &mut W, scoreboard: &Scoreboard, pixels: &mut [RGB8]) {
    let mut startup = scoreboard.startup_animation();
    while let Some(step) = startup.next_step(pixels) {
        strip.set_brightness(step.brightness);
        flush(strip, pixels);
        if step.hold_ms > 0 {
            Timer::after(Duration::from_millis(step.hold_ms.into())).await;
        }
    }
}

fn blank<W: StripWriter>(strip: &mut W, scoreboard: &Scoreboard, pixels: &mut [RGB8]) {
    pixels.fill(scoreboard.config().display.background);
    flush(strip, pixels);
}

fn flush<W: StripWriter>(strip: &mut W, pixels: &[RGB8]) {
    if let Err(e) = strip.write(pixels) {
        error!("Failed to write LED strip: {}", e);
    }
}

/// Scoreboard Task - Embassy Task für den Control-Loop
///
/// Dieser Task übernimmt die Hardware-Initialisierung und ruft dann
/// die testbare `scoreboard_logic()` Funktion auf.
///
/// # Parameter
/// - `data_pin`: GPIO16 Peripheral für die Strip-Datenleitung
/// - `rmt_peripheral`: RMT Peripheral für präzises Timing
/// - `button1`, `button2`: Spieler-Tasten (Pull-Up, gedrückt = low)
#[embassy_executor::task]
pub async fn scoreboard_task(
    data_pin: esp_hal::peripherals::GPIO16<'static>,
    rmt_peripheral: esp_hal::peripherals::RMT<'static>,
    button1: Input<'static>,
    button2: Input<'static>,
) {
    // Buffer für SmartLED Daten erstellen (ganzer Strip)
    // Macro allokiert Speicher im richtigen Format für RMT
    let mut rmt_buffer = smart_led_buffer!(LED_COUNT);

    // Hardware initialisieren: RmtStripWriter kapselt RMT + SmartLED
    let strip = match RmtStripWriter::new(
        data_pin,
        rmt_peripheral,
        RMT_CLOCK_MHZ,
        &mut rmt_buffer,
        LED_BRIGHTNESS,
    ) {
        Ok(strip) => strip,
        Err(e) => {
            error!("Failed to initialize LED strip: {}", e);
            return;
        }
    };

    // Business Logic aufrufen
    scoreboard_logic(strip, || [button1.is_low(), button2.is_low()]).await;
}
