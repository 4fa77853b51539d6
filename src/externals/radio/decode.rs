use common::packet::Packet;
use tracing::{debug, trace, warn};

use crate::models::sensor_config::{DecodeError, SensorConfigRequest};

/// A control request which made it through the decoding boundary. Only
/// known sensor classes and valid rates get this far.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InboundCommand {
    Configure(SensorConfigRequest),
    StopAll,
}

impl TryFrom<Packet> for InboundCommand {
    type Error = DecodeError;

    fn try_from(value: Packet) -> Result<Self, Self::Error> {
        match value {
            Packet::ConfigureSensor(packet) => {
                Ok(InboundCommand::Configure(SensorConfigRequest::try_from(packet)?))
            }
            Packet::StopAllSensors => Ok(InboundCommand::StopAll),
        }
    }
}

/// Decode as many packets as possible from a buffer.
/// Returning the vector of packets and any unused bytes from the buffer.
pub fn decode_packets_from_buffer(buffer: &[u8]) -> (Vec<Packet>, &[u8]) {
    let mut remaining_buffer = buffer;
    let mut packets: Vec<Packet> = vec![];
    while let Ok((packet, extra)) = postcard::take_from_bytes::<Packet>(remaining_buffer) {
        remaining_buffer = extra;
        packets.push(packet);
    }
    if !buffer.is_empty() && packets.is_empty() {
        debug!("Didn't decode a single packet from {} bytes.", buffer.len());
    }
    (packets, remaining_buffer)
}

/// Decode a buffer into commands, dropping packets which fail validation.
/// Returns the commands and the bytes of any packet that is still incomplete.
pub fn decode_commands(buffer: &[u8]) -> (Vec<InboundCommand>, &[u8]) {
    let (packets, remaining) = decode_packets_from_buffer(buffer);
    if !remaining.is_empty() {
        trace!("{} bytes left over after decoding.", remaining.len());
    }
    let commands = packets
        .into_iter()
        .filter_map(|packet| match InboundCommand::try_from(packet) {
            Ok(command) => Some(command),
            Err(e) => {
                warn!("Rejected configuration packet {:?}. Error: {}", packet, e);
                None
            }
        })
        .collect();
    (commands, remaining)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sensor_class::SensorClass;
    use common::{
        packet::SensorConfigurationPacket,
        sensor_id::{ACC_GYRO_MAG, SENSOR_COUNT},
    };

    fn encode(packets: &[Packet]) -> Vec<u8> {
        packets
            .iter()
            .flat_map(|packet| postcard::to_allocvec(packet).expect("Failed to encode packet."))
            .collect()
    }

    #[test]
    fn test_decodes_configure_and_stop() {
        let bytes = encode(&[
            SensorConfigurationPacket::new_packet(ACC_GYRO_MAG, 50f32, 10),
            Packet::StopAllSensors,
        ]);

        let (commands, remaining) = decode_commands(&bytes);

        assert!(remaining.is_empty());
        assert_eq!(commands.len(), 2);
        match commands[0] {
            InboundCommand::Configure(request) => {
                assert_eq!(request.sensor_class, SensorClass::Motion);
                assert_eq!(request.sample_rate.hz(), 50f32);
                assert_eq!(request.latency_ms, 10);
            }
            other => panic!("Unexpected command {:?}", other),
        }
        assert_eq!(commands[1], InboundCommand::StopAll);
    }

    #[test]
    fn test_unknown_sensor_never_reaches_core() {
        let bytes = encode(&[
            SensorConfigurationPacket::new_packet(SENSOR_COUNT + 4, 50f32, 0),
            SensorConfigurationPacket::new_packet(ACC_GYRO_MAG, -1f32, 0),
            Packet::StopAllSensors,
        ]);

        let (commands, _) = decode_commands(&bytes);
        assert_eq!(commands, vec![InboundCommand::StopAll]);
    }

    #[test]
    fn test_partial_packet_is_left_over() {
        let bytes = encode(&[SensorConfigurationPacket::new_packet(ACC_GYRO_MAG, 50f32, 0)]);
        let (packets, remaining) = decode_packets_from_buffer(&bytes[..bytes.len() - 1]);
        assert!(packets.is_empty());
        assert_eq!(remaining.len(), bytes.len() - 1);
    }
}
