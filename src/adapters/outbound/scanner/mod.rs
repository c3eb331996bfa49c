/// Scanner adapters
mod command_scanner;

pub use command_scanner::CommandScanner;
