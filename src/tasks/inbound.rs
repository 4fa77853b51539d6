use tokio::sync::mpsc::{Receiver, Sender};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace, warn};

use crate::{
    config::MAX_PENDING_INBOUND_BYTES,
    externals::radio::decode::{decode_commands, InboundCommand},
};

/// Task: Decode raw frames received over the wireless link into commands for
/// the device. Invalid packets are dropped here. A packet split across frames
/// is held back until the rest arrives. Ends when cancelled or when the link
/// closes.
#[tracing::instrument(skip_all)]
pub async fn task_decode_inbound_configuration(
    token: CancellationToken,
    mut rx_inbound_bytes: Receiver<Vec<u8>>,
    tx_commands: Sender<InboundCommand>,
) {
    info!("Started.");
    let mut pending: Vec<u8> = vec![];
    loop {
        tokio::select! {
            _ = token.cancelled() => {
                warn!("Cancelled.");
                break;
            },
            frame = rx_inbound_bytes.recv() => {
                let Some(bytes) = frame else {
                    info!("Inbound link closed.");
                    break;
                };
                trace!("Received {} bytes.", bytes.len());
                pending.extend_from_slice(&bytes);
                let (commands, remaining) = decode_commands(&pending);
                let consumed = pending.len() - remaining.len();
                pending.drain(..consumed);
                if pending.len() > MAX_PENDING_INBOUND_BYTES {
                    warn!("Discarding {} undecodable bytes.", pending.len());
                    pending.clear();
                }
                for command in commands {
                    if let Err(e) = tx_commands.send(command).await {
                        error!("Failed to forward inbound command. Error: {}", e);
                    } else {
                        debug!("Forwarded inbound command.");
                    }
                }
            },
        };
    }
}
