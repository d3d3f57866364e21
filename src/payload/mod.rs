//! Payload decoders: one module per message type, each
//! exposing `decode`/`encode` over a typed item shape, plus [`TypedPayload`]
//! and [`decode_payload`] which dispatch on [`crate::header::MessageType`].

pub mod angular_kinematics;
pub mod center_of_mass;
mod common;
pub mod euler;
pub mod joint_angles;
pub mod linear_kinematics;
pub mod meta;
pub mod points;
pub mod quaternion;
pub mod scale;
pub mod time_code;
pub mod tracker_kinematics;
pub mod unity3d;

pub use common::{Quat, Vec3};

use crate::error::Result;
use crate::header::{Header, MessageType};
use crate::telemetry::TelemetrySink;

/// A decoded frame's payload, tagged by message type.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum TypedPayload {
    Euler(Vec<euler::EulerItem>),
    Quaternion(Vec<quaternion::QuatItem>),
    Points(Vec<points::PointItem>),
    Unity3d(Vec<unity3d::Unity3dItem>),
    Meta(meta::MetaPayload),
    Scale(scale::ScalePayload),
    JointAngles(Vec<joint_angles::JointAngleItem>),
    LinearKinematics(Vec<linear_kinematics::LinearKinematicsItem>),
    AngularKinematics(Vec<angular_kinematics::AngularKinematicsItem>),
    TrackerKinematics(Vec<tracker_kinematics::TrackerKinematicsItem>),
    CenterOfMass(center_of_mass::CenterOfMassPayload),
    TimeCode(time_code::TimeCode),
}

/// Decodes `bytes` (a completed frame's concatenated payload) according to
/// `message_type`. Segment-addressed types use `header`'s counts to validate
/// item ids; self-delimited types (meta, scale, time code) ignore it.
pub fn decode_payload(
    message_type: MessageType,
    header: &Header,
    bytes: &[u8],
    telemetry: &mut dyn TelemetrySink,
) -> Result<TypedPayload> {
    Ok(match message_type {
        MessageType::EulerPose => TypedPayload::Euler(euler::decode(header, bytes, telemetry)?),
        MessageType::QuaternionPose => TypedPayload::Quaternion(quaternion::decode(header, bytes, telemetry)?),
        MessageType::Points => TypedPayload::Points(points::decode(bytes)?),
        MessageType::Unity3DPose => TypedPayload::Unity3d(unity3d::decode(header, bytes, telemetry)?),
        MessageType::Meta => TypedPayload::Meta(meta::decode(bytes)?),
        MessageType::Scale => TypedPayload::Scale(scale::decode(bytes)?),
        MessageType::JointAngles => TypedPayload::JointAngles(joint_angles::decode(bytes)?),
        MessageType::LinearKinematics => {
            TypedPayload::LinearKinematics(linear_kinematics::decode(header, bytes, telemetry)?)
        }
        MessageType::AngularKinematics => {
            TypedPayload::AngularKinematics(angular_kinematics::decode(header, bytes, telemetry)?)
        }
        MessageType::TrackerKinematics => {
            TypedPayload::TrackerKinematics(tracker_kinematics::decode(header, bytes, telemetry)?)
        }
        MessageType::CenterOfMass => TypedPayload::CenterOfMass(center_of_mass::decode(bytes)?),
        MessageType::TimeCode => TypedPayload::TimeCode(time_code::decode(bytes)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::NullTelemetrySink;

    fn header() -> Header {
        Header {
            msg_type_code: 24,
            sample_counter: 1,
            is_last: true,
            fragment_index: 0,
            item_count: 1,
            time_code_ms: 0,
            character_id: 0,
            body_segment_count: 23,
            prop_count: 0,
            finger_segment_count: 0,
            payload_size: center_of_mass::LENGTH as u16,
        }
    }

    #[test]
    fn dispatches_center_of_mass() {
        let payload = center_of_mass::CenterOfMassPayload {
            position: Vec3 { x: 1.0, y: 2.0, z: 3.0 },
        };
        let bytes = center_of_mass::encode(&payload);
        let mut sink = NullTelemetrySink;
        let decoded = decode_payload(MessageType::CenterOfMass, &header(), &bytes, &mut sink).unwrap();
        assert_eq!(decoded, TypedPayload::CenterOfMass(payload));
    }
}
