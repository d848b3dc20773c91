use super::GameSignal;
use crate::error::SynergyError;

/// Anything that reacts to game signals.
pub trait SignalHandler {
    fn handle_signal(&mut self, signal: &GameSignal) -> Result<(), SynergyError>;

    /// Handle signals in order, stopping at the first error
    fn handle_signals(&mut self, signals: &[GameSignal]) -> Result<(), SynergyError> {
        for signal in signals {
            self.handle_signal(signal)?;
        }
        Ok(())
    }
}
