// Task-Modul: Enthält alle Embassy Tasks
//
// Der Scoreboard-Task ist der einzige Konsument von Spielstand und
// Pixel-Buffer; beides lebt exklusiv in seinem Loop.

pub mod scoreboard;

// Re-export Tasks für einfachen Import
pub use scoreboard::scoreboard_task;
