// LED Strip Writer: Implementierung des StripWriter-Traits aus scorer-core
//
// Flusht den kompletten Pixel-Buffer über das RMT Peripheral auf den
// WS2815-Strip. Die globale Helligkeit wird beim Flush angewendet,
// der Buffer selbst bleibt unskaliert.

use esp_hal::Blocking;
use esp_hal::rmt::Rmt;
use esp_hal::time::Rate;
use esp_hal_smartled::SmartLedsAdapter;
use rgb::RGB8;
use smart_leds_trait::SmartLedsWrite;

use crate::config::LED_BUFFER_SIZE;
use scorer_core::{StripError, StripWriter};

/// Real Hardware Strip Writer
///
/// Nutzt ESP32 RMT Peripheral um WS2812/WS2815 LEDs anzusteuern.
///
/// Hinweis: Der Buffer wird im Task erstellt und als Parameter übergeben
/// statt im Constructor allokiert (Lifetime des RMT-Kanals).
pub struct RmtStripWriter<'a> {
    strip: SmartLedsAdapter<'a, LED_BUFFER_SIZE>,
    brightness: u8,
}

impl<'a> RmtStripWriter<'a> {
    /// Erstellt einen neuen RmtStripWriter
    ///
    /// # Parameter
    /// - `data_pin`: GPIO16 Peripheral für die Datenleitung
    /// - `rmt_peripheral`: RMT Peripheral
    /// - `rmt_clock_mhz`: RMT Clock Frequenz in MHz (z.B. 80)
    /// - `buffer`: Buffer für LED-Daten (erstellt mit smart_led_buffer!(LED_COUNT))
    /// - `brightness`: Start-Helligkeit (0-255)
    pub fn new(
        data_pin: esp_hal::peripherals::GPIO16<'a>,
        rmt_peripheral: esp_hal::peripherals::RMT<'a>,
        rmt_clock_mhz: u32,
        buffer: &'a mut [esp_hal::rmt::PulseCode; LED_BUFFER_SIZE],
        brightness: u8,
    ) -> Result<Self, StripError> {
        // RMT initialisieren
        let rmt: Rmt<'a, Blocking> = Rmt::new(rmt_peripheral, Rate::from_mhz(rmt_clock_mhz))
            .map_err(|_| StripError::InitFailed)?;

        // SmartLED Adapter erstellen
        let strip = SmartLedsAdapter::new(rmt.channel0, data_pin, buffer);

        Ok(Self { strip, brightness })
    }
}

impl<'a> StripWriter for RmtStripWriter<'a> {
    fn write(&mut self, pixels: &[RGB8]) -> Result<(), StripError> {
        self.strip
            .write(smart_leds::brightness(
                pixels.iter().copied(),
                self.brightness,
            ))
            .map_err(|_| StripError::WriteFailed)
    }

    fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }
}
