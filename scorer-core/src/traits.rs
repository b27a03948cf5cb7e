//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für Hardware-Zugriff
//! ohne konkrete Implementierung.

use rgb::RGB8;

/// Fehler-Typ für Strip-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StripError {
    /// Peripheral konnte nicht initialisiert werden
    InitFailed,
    WriteFailed,
}

/// Trait für den Zugriff auf den LED-Strip
///
/// Abstrahiert den Flush des Pixel-Buffers auf WS2812/WS2815 LEDs.
///
/// # Implementierungen
/// - **Production:** RmtStripWriter (ESP32 RMT Peripheral)
/// - **Testing:** MockStripWriter (in-memory Mock)
pub trait StripWriter {
    /// Schreibt den kompletten Buffer auf den Strip
    ///
    /// # Fehlerbehandlung
    /// Gibt `StripError::WriteFailed` zurück wenn Hardware-Zugriff fehlschlägt
    fn write(&mut self, pixels: &[RGB8]) -> Result<(), StripError>;

    /// Setzt die globale Helligkeit für folgende `write()`-Aufrufe
    fn set_brightness(&mut self, brightness: u8);
}
