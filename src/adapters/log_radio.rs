//! Log-based radio adapter.
//!
//! Implements [`RadioPort`] by writing every publication to the logger.
//! Used on the host, where there is no radio; a framing adapter for the
//! real transceiver implements the same trait.

use log::info;

use crate::app::events::Publication;
use crate::app::ports::RadioPort;

/// Adapter that logs every [`Publication`] and counts them.
#[derive(Debug, Default)]
pub struct LogRadio {
    sent: u32,
}

impl LogRadio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publications sent since boot.
    pub fn sent(&self) -> u32 {
        self.sent
    }
}

impl RadioPort for LogRadio {
    fn publish(&mut self, publication: &Publication) {
        self.sent = self.sent.wrapping_add(1);
        match publication {
            Publication::Numeric {
                quantity,
                channel,
                value,
            } => {
                info!(
                    "RADIO | {} ch{:#04x} = {:.2}{}",
                    quantity,
                    channel,
                    value,
                    quantity.unit()
                );
            }
            Publication::Boolean { topic, value } => {
                info!("RADIO | {} = {}", topic, value);
            }
            Publication::PairingRequest { firmware, version } => {
                info!("RADIO | pairing request {} v{}", firmware, version);
            }
        }
    }
}
