//! Farb- und Helligkeits-Mathematik (8-Bit, ganzzahlig)
//!
//! Funktionen ohne Hardware-Dependencies (testbar!). Verhalten entspricht
//! den üblichen LED-Strip-Helfern: `scale8`, `sin8`, `beatsin8`.

use rgb::RGB8;
use smart_leds::hsv::{Hsv, hsv2rgb};

/// Skaliert einen 8-Bit-Wert mit `scale / 256`
///
/// `scale == 255` lässt den Wert unverändert.
///
/// ```
/// # use scorer_core::color::scale8;
/// assert_eq!(scale8(255, 255), 255);
/// assert_eq!(scale8(200, 128), 100);
/// assert_eq!(scale8(200, 0), 0);
/// ```
pub fn scale8(value: u8, scale: u8) -> u8 {
    ((u16::from(value) * (1 + u16::from(scale))) >> 8) as u8
}

/// Skaliert alle drei Kanäle einer Farbe
pub fn nscale8(color: RGB8, scale: u8) -> RGB8 {
    RGB8 {
        r: scale8(color.r, scale),
        g: scale8(color.g, scale),
        b: scale8(color.b, scale),
    }
}

/// Sinus-Approximation: eine volle Periode über 0..=255, Ausgabe 1..=255
pub fn sin8(theta: u8) -> u8 {
    // Stützstellen (b, m16) für vier Abschnitte pro Viertelwelle
    const B_M16: [u8; 8] = [0, 49, 49, 41, 90, 27, 117, 10];

    let mut offset = theta;
    if theta & 0x40 != 0 {
        offset = 255 - offset;
    }
    offset &= 0x3F;

    let mut secoffset = offset & 0x0F;
    if theta & 0x40 != 0 {
        secoffset += 1;
    }

    let section = usize::from(offset >> 4) * 2;
    let b = i16::from(B_M16[section]);
    let m16 = u16::from(B_M16[section + 1]);

    let mx = ((m16 * u16::from(secoffset)) >> 4) as i16;
    let mut y = mx + b;
    if theta & 0x80 != 0 {
        y = -y;
    }
    (y + 128) as u8
}

/// Sägezahn mit `bpm` Schlägen pro Minute, 0..=255
pub fn beat8(bpm: u8, now_ms: u64) -> u8 {
    // 65536 Schritte pro Schlag, bpm in Q8.8
    let bpm88 = u64::from(bpm) << 8;
    let beat16 = ((now_ms.wrapping_mul(bpm88).wrapping_mul(280)) >> 16) as u16;
    (beat16 >> 8) as u8
}

/// Sinus-Puls zwischen `min` und `max`
pub fn beat_sin8(bpm: u8, now_ms: u64, min: u8, max: u8) -> u8 {
    let range = max.saturating_sub(min);
    min + scale8(sin8(beat8(bpm, now_ms)), range)
}

/// Farbe aus dem Regenbogen (Hue 0..=255)
pub fn rainbow(hue: u8, sat: u8, val: u8) -> RGB8 {
    hsv2rgb(Hsv { hue, sat, val })
}

/// Lineare Abbildung eines Wertebereichs (ganzzahlig, wie Arduino `map`)
pub fn map_range(value: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    if in_max == in_min {
        return out_min;
    }
    (value - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale8_bounds() {
        assert_eq!(scale8(0, 255), 0);
        assert_eq!(scale8(255, 255), 255);
        assert_eq!(scale8(255, 0), 0);
        assert_eq!(scale8(100, 127), 50);
    }

    #[test]
    fn test_nscale8_scales_every_channel() {
        let color = RGB8 {
            r: 255,
            g: 128,
            b: 0,
        };
        assert_eq!(nscale8(color, 127), RGB8 { r: 127, g: 64, b: 0 });
    }

    #[test]
    fn test_sin8_key_points() {
        assert_eq!(sin8(0), 128);
        assert_eq!(sin8(64), 255);
        assert_eq!(sin8(128), 128);
        assert_eq!(sin8(192), 1);
    }

    #[test]
    fn test_sin8_stays_in_range() {
        for theta in 0..=255u8 {
            let value = sin8(theta);
            assert!(value >= 1);
        }
    }

    #[test]
    fn test_beat8_advances_with_time() {
        assert_eq!(beat8(60, 0), 0);
        // 60 bpm: eine volle Periode pro Sekunde (ca.)
        assert!(beat8(60, 250) > 50);
        assert!(beat8(60, 500) > 120);
    }

    #[test]
    fn test_beat_sin8_within_envelope() {
        for ms in (0..5000u64).step_by(37) {
            let value = beat_sin8(20, ms, 40, 255);
            assert!(value >= 40);
        }
        assert_eq!(beat_sin8(20, 0, 40, 255), 40 + scale8(128, 215));
    }

    #[test]
    fn test_beat_sin8_flat_envelope() {
        assert_eq!(beat_sin8(20, 1234, 90, 90), 90);
    }

    #[test]
    fn test_map_range() {
        assert_eq!(map_range(0, 0, 30, 0, 100), 0);
        assert_eq!(map_range(15, 0, 30, 0, 100), 50);
        assert_eq!(map_range(15, 0, 30, 100, 0), 50);
        assert_eq!(map_range(29, 0, 30, 0, 100), 96);
        assert_eq!(map_range(5, 3, 3, 7, 9), 7);
    }
}
