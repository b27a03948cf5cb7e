// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen
//
// Spielregeln, Farben und Animations-Timing stehen in scorer_core::config
// (ScoreboardConfig). Hier nur, was an der Platine hängt.

use scorer_core::ScoreboardConfig;

// ============================================================================
// LED Strip Konfiguration
// ============================================================================

/// GPIO-Pin für die Datenleitung des Strips (LED1 auf QuinLED Dig-Uno)
/// Muss zu `GPIO16` in bin/main.rs und tasks/scoreboard.rs passen
pub const LED_GPIO_PIN: u8 = 16;

/// Anzahl der LEDs im Strip (144 LEDs/m, 1 m)
pub const LED_COUNT: usize = 144;

/// Helligkeits-Level im Betrieb (0-255)
/// Konservativ gewählt, WS2815 ziehen bei voller Helligkeit viel Strom
pub const LED_BRIGHTNESS: u8 = 80;

/// RMT Taktfrequenz in MHz
/// 80 MHz ist optimal für WS2812 LED-Timing
pub const RMT_CLOCK_MHZ: u32 = 80;

/// RMT Buffer-Größe (24 Bits pro LED + 1 Reset)
pub const LED_BUFFER_SIZE: usize = LED_COUNT * 24 + 1;

// ============================================================================
// Tasten Konfiguration
// ============================================================================
//
// Die Pin-Nummern hier sind nur für Log-Ausgaben. Die Peripherals selbst
// werden in bin/main.rs gebunden (GPIO15, GPIO12); beide Stellen gemeinsam
// ändern.

/// Taste Spieler 1 (linke Seite) - Q1 auf QuinLED Dig-Uno v3
pub const BUTTON_PLAYER1_PIN: u8 = 15;

/// Taste Spieler 2 (rechte Seite) - Q2 auf QuinLED Dig-Uno v3
pub const BUTTON_PLAYER2_PIN: u8 = 12;

/// Minimaler Abstand zwischen zwei Tastendrücken in ms
pub const DEBOUNCE_MS: u64 = 250;

/// Beide Tasten so lange halten für Reset (ms)
pub const LONG_PRESS_MS: u64 = 3000;

// ============================================================================
// Control-Loop Timing
// ============================================================================

/// Pause pro Loop-Durchlauf (~60 FPS)
pub const LOOP_INTERVAL_MS: u64 = 16;

/// Dunkelpause vor einem neuen Spiel
pub const NEW_GAME_PAUSE_MS: u64 = 300;

/// Dunkelpause nach Reset, bevor die Startup-Animation läuft
pub const RESET_PAUSE_MS: u64 = 200;

/// Scoreboard-Konfiguration für diese Platine
pub fn scoreboard_config() -> ScoreboardConfig {
    let mut config = ScoreboardConfig::default().with_total_cells(LED_COUNT);
    config.display.brightness = LED_BRIGHTNESS;
    config
}
