//! Tasten-Auswertung: Entprellung, Flankenerkennung, Reset-Geste
//!
//! Die Firmware liest nur die Pin-Pegel (active low) und reicht sie mit
//! der aktuellen Zeit herein. Heraus kommen diskrete [`InputEvent`]s.

use heapless::Vec;

use crate::types::InputEvent;

/// Maximal erzeugte Events pro Poll (Reset + zwei Punkte)
pub const MAX_EVENTS_PER_POLL: usize = 3;

/// Eine entprellte Taste
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    debounce_ms: u64,
    was_low: bool,
    is_low: bool,
    last_press_ms: Option<u64>,
    pressed: bool,
}

impl Button {
    pub const fn new(debounce_ms: u64) -> Self {
        Self {
            debounce_ms,
            was_low: false,
            is_low: false,
            last_press_ms: None,
            pressed: false,
        }
    }

    /// Neuer Pegel; erkennt fallende Flanken außerhalb der Entprellzeit
    pub fn update(&mut self, is_low: bool, now_ms: u64) {
        self.pressed = false;
        self.is_low = is_low;

        if is_low && !self.was_low {
            let debounced = match self.last_press_ms {
                Some(last) => now_ms.saturating_sub(last) > self.debounce_ms,
                None => true,
            };
            if debounced {
                self.pressed = true;
                self.last_press_ms = Some(now_ms);
            }
        }
        self.was_low = is_low;
    }

    /// `true` genau im Poll der erkannten Flanke
    pub fn pressed(&self) -> bool {
        self.pressed
    }

    pub fn is_held(&self) -> bool {
        self.is_low
    }
}

/// Beide Spieler-Tasten plus Lang-Druck-Reset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controls {
    buttons: [Button; 2],
    long_press_ms: u64,
    both_held_since: Option<u64>,
    reset_latched: bool,
}

impl Controls {
    pub const fn new(debounce_ms: u64, long_press_ms: u64) -> Self {
        Self {
            buttons: [Button::new(debounce_ms), Button::new(debounce_ms)],
            long_press_ms,
            both_held_since: None,
            reset_latched: false,
        }
    }

    /// Wertet die Pegel beider Tasten aus (`true` = gedrückt)
    ///
    /// Der Reset feuert einmal pro Halten. Solange die Geste gehalten wird,
    /// zählen keine Punkte.
    pub fn poll(&mut self, levels: [bool; 2], now_ms: u64) -> Vec<InputEvent, MAX_EVENTS_PER_POLL> {
        let mut events = Vec::new();

        for (button, level) in self.buttons.iter_mut().zip(levels) {
            button.update(level, now_ms);
        }

        if self.buttons.iter().all(Button::is_held) {
            match self.both_held_since {
                None => self.both_held_since = Some(now_ms),
                Some(since) => {
                    if !self.reset_latched && now_ms.saturating_sub(since) >= self.long_press_ms {
                        self.reset_latched = true;
                        let _ = events.push(InputEvent::ResetGame);
                    }
                }
            }
        } else {
            self.both_held_since = None;
            self.reset_latched = false;
        }

        if !self.reset_latched {
            for (index, button) in self.buttons.iter().enumerate() {
                if button.pressed() {
                    let _ = events.push(InputEvent::PointScored(index as u8));
                }
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_detects_falling_edge_once() {
        let mut button = Button::new(250);
        button.update(true, 1000);
        assert!(button.pressed());
        button.update(true, 1016);
        assert!(!button.pressed());
        assert!(button.is_held());
    }

    #[test]
    fn test_button_debounce() {
        let mut button = Button::new(250);
        button.update(true, 1000);
        button.update(false, 1050);
        button.update(true, 1100);
        assert!(!button.pressed());

        button.update(false, 1200);
        button.update(true, 1300);
        assert!(button.pressed());
    }

    #[test]
    fn test_controls_report_points() {
        let mut controls = Controls::new(250, 3000);
        let events = controls.poll([true, false], 500);
        assert_eq!(events.as_slice(), &[InputEvent::PointScored(0)]);

        let events = controls.poll([false, true], 516);
        assert_eq!(events.as_slice(), &[InputEvent::PointScored(1)]);
    }

    #[test]
    fn test_long_press_resets_once() {
        let mut controls = Controls::new(250, 3000);
        controls.poll([true, true], 0);

        let mut resets = 0;
        for now in (16..6000u64).step_by(16) {
            let events = controls.poll([true, true], now);
            resets += events
                .iter()
                .filter(|e| **e == InputEvent::ResetGame)
                .count();
        }
        assert_eq!(resets, 1);

        // Loslassen entriegelt die Geste
        controls.poll([false, false], 6000);
        controls.poll([true, true], 7000);
        let events = controls.poll([true, true], 10_000);
        assert_eq!(events.as_slice(), &[InputEvent::ResetGame]);
    }

    #[test]
    fn test_no_events_while_gesture_held() {
        let mut controls = Controls::new(250, 3000);
        controls.poll([true, true], 0);
        controls.poll([true, true], 3000);

        let events = controls.poll([true, true], 3100);
        assert!(events.is_empty());
    }
}
