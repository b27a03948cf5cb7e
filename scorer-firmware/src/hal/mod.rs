// Hardware Abstraction Layer (HAL) Module
//
// Dieses Modul kapselt Hardware-Zugriffe hinter den Traits aus scorer-core,
// damit die Scoreboard-Logik auf dem Host testbar bleibt.

pub mod strip_writer;

pub use strip_writer::RmtStripWriter;
