use super::{FRAME_LEN, HEADER};
use crate::errors::{DriverError, DriverResult};
use crate::types::{Degrees, Hours};
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Command id byte. Only the effective ids the mount documents are named
/// here; an undocumented id sent to the mount freezes its telemetry until
/// another effective id is sent — that behavior lives in the mount
/// firmware, not this codec.
///
/// The concrete values for `SYNC`, the four `MOVE_*` ids and `DISCONNECT`
/// are an open question upstream (no two source variants agree, and no
/// hardware was available to reverse-engineer them); the values below are
/// implementation-defined placeholders chosen to avoid colliding with the
/// documented ids. See DESIGN.md.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum CommandId {
    MoveNorth = 0x10,
    MoveSouth = 0x11,
    MoveEast = 0x12,
    MoveWest = 0x13,
    Disconnect = 0x1B,
    StopMotion = 0x1D,
    Park = 0x1E,
    GetSiteLocation = 0x1F,
    GoTo = 0x23,
    Sync = 0x24,
    SetSiteLocation = 0x25,
    SetDateTime = 0x26,
    SiteLocationReport = 0xFE,
    PositionReport = 0xFF,
}

/// An outbound command, validated and ready to encode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutboundCommand {
    StopMotion,
    Park,
    GetSiteLocation,
    GoTo { ra: Hours, dec: Degrees },
    Sync { ra: Hours, dec: Degrees },
    SetSiteLocation { lat: Degrees, lon: Degrees },
    SetDateTime {
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    },
    MoveNorth,
    MoveSouth,
    MoveEast,
    MoveWest,
    Disconnect,
}

/// A decoded inbound frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InboundFrame {
    PositionReport { ra: Hours, dec: Degrees },
    SiteLocationReport { lat: Degrees, lon: Degrees },
    /// A recognized-but-non-telemetry id, or an id the codec does not know:
    /// a no-op, not a decode failure — the mount is known to send
    /// undocumented filler.
    Ignored(u8),
}

fn check_range(name: &'static str, value: f32, lo: f32, hi: f32, inclusive_hi: bool) -> DriverResult<()> {
    let in_range = if inclusive_hi {
        (lo..=hi).contains(&value)
    } else {
        (lo..hi).contains(&value)
    };
    if in_range {
        Ok(())
    } else {
        Err(DriverError::Domain(format!(
            "{name} of {value} is out of range [{lo}, {hi}{})",
            if inclusive_hi { "]" } else { ")" }
        )))
    }
}

fn check_ra(ra: Hours) -> DriverResult<()> {
    check_range("right ascension", ra, 0.0, 24.0, false)
}

fn check_dec(dec: Degrees) -> DriverResult<()> {
    check_range("declination", dec, -90.0, 90.0, true)
}

fn check_lat(lat: Degrees) -> DriverResult<()> {
    check_range("latitude", lat, -90.0, 90.0, true)
}

fn check_lon(lon: Degrees) -> DriverResult<()> {
    check_range("longitude", lon, -180.0, 180.0, true)
}

fn check_u32_range(name: &'static str, value: u32, lo: u32, hi: u32) -> DriverResult<()> {
    if (lo..=hi).contains(&value) {
        Ok(())
    } else {
        Err(DriverError::Domain(format!(
            "{name} of {value} is out of range [{lo}, {hi}]"
        )))
    }
}

fn frame(id: CommandId, payload: [u8; 8]) -> [u8; FRAME_LEN] {
    let mut out = [0u8; FRAME_LEN];
    out[0..4].copy_from_slice(&HEADER);
    out[4] = id.into();
    out[5..13].copy_from_slice(&payload);
    out
}

fn coord_payload(a: f32, b: f32) -> [u8; 8] {
    let mut payload = [0u8; 8];
    payload[0..4].copy_from_slice(&a.to_le_bytes());
    payload[4..8].copy_from_slice(&b.to_le_bytes());
    payload
}

/// Encode a validated outbound command into a fresh 13-byte frame.
///
/// Arguments are validated before emission; an out-of-range argument fails
/// with [`DriverError::Domain`] and produces no bytes at all.
pub fn encode(command: OutboundCommand) -> DriverResult<[u8; FRAME_LEN]> {
    match command {
        OutboundCommand::StopMotion => Ok(frame(CommandId::StopMotion, [0; 8])),
        OutboundCommand::Park => Ok(frame(CommandId::Park, [0; 8])),
        OutboundCommand::GetSiteLocation => Ok(frame(CommandId::GetSiteLocation, [0; 8])),
        OutboundCommand::Disconnect => Ok(frame(CommandId::Disconnect, [0; 8])),
        OutboundCommand::MoveNorth => Ok(frame(CommandId::MoveNorth, [0; 8])),
        OutboundCommand::MoveSouth => Ok(frame(CommandId::MoveSouth, [0; 8])),
        OutboundCommand::MoveEast => Ok(frame(CommandId::MoveEast, [0; 8])),
        OutboundCommand::MoveWest => Ok(frame(CommandId::MoveWest, [0; 8])),
        OutboundCommand::GoTo { ra, dec } => {
            check_ra(ra)?;
            check_dec(dec)?;
            Ok(frame(CommandId::GoTo, coord_payload(ra, dec)))
        }
        OutboundCommand::Sync { ra, dec } => {
            check_ra(ra)?;
            check_dec(dec)?;
            Ok(frame(CommandId::Sync, coord_payload(ra, dec)))
        }
        OutboundCommand::SetSiteLocation { lat, lon } => {
            check_lat(lat)?;
            check_lon(lon)?;
            Ok(frame(CommandId::SetSiteLocation, coord_payload(lat, lon)))
        }
        OutboundCommand::SetDateTime {
            year,
            month,
            day,
            hour,
            minute,
            second,
        } => {
            check_u32_range("year", year as u32, 0, 9999)?;
            check_u32_range("month", month as u32, 1, 12)?;
            check_u32_range("day", day as u32, 1, 31)?;
            check_u32_range("hour", hour as u32, 0, 23)?;
            check_u32_range("minute", minute as u32, 0, 59)?;
            check_u32_range("second", second as u32, 0, 59)?;
            let year_bytes = year.to_le_bytes();
            let payload = [
                year_bytes[0],
                year_bytes[1],
                month,
                day,
                hour,
                minute,
                second,
                0,
            ];
            Ok(frame(CommandId::SetDateTime, payload))
        }
    }
}

/// Decode a 13-byte slice known to begin at the header. Unknown or
/// non-telemetry ids decode as [`InboundFrame::Ignored`], never an error.
pub fn decode(raw: &[u8; FRAME_LEN]) -> InboundFrame {
    let id_byte = raw[4];
    let payload = &raw[5..13];
    match CommandId::try_from_primitive(id_byte) {
        Ok(CommandId::PositionReport) => InboundFrame::PositionReport {
            ra: f32::from_le_bytes(payload[0..4].try_into().unwrap()),
            dec: f32::from_le_bytes(payload[4..8].try_into().unwrap()),
        },
        Ok(CommandId::SiteLocationReport) => InboundFrame::SiteLocationReport {
            lat: f32::from_le_bytes(payload[0..4].try_into().unwrap()),
            lon: f32::from_le_bytes(payload[4..8].try_into().unwrap()),
        },
        _ => InboundFrame::Ignored(id_byte),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::assert_float_absolute_eq;

    #[test]
    fn encode_goto_matches_expected_wire_bytes() {
        let bytes = encode(OutboundCommand::GoTo { ra: 6.0, dec: 90.0 }).unwrap();
        assert_eq!(&bytes[0..5], &[0x55, 0xAA, 0x01, 0x09, 0x23]);
        assert_eq!(&bytes[5..9], &6.0f32.to_le_bytes());
        assert_eq!(&bytes[9..13], &90.0f32.to_le_bytes());
    }

    #[test]
    fn encode_set_site_location_matches_expected_wire_bytes() {
        let bytes = encode(OutboundCommand::SetSiteLocation {
            lat: 52.0,
            lon: 13.0,
        })
        .unwrap();
        assert_eq!(bytes[4], 0x25);
        assert_eq!(&bytes[5..9], &52.0f32.to_le_bytes());
        assert_eq!(&bytes[9..13], &13.0f32.to_le_bytes());
    }

    #[test]
    fn encode_set_date_time_matches_expected_wire_bytes() {
        let bytes = encode(OutboundCommand::SetDateTime {
            year: 2020,
            month: 12,
            day: 12,
            hour: 12,
            minute: 12,
            second: 0,
        })
        .unwrap();
        assert_eq!(bytes[4], 0x26);
        assert_eq!(
            &bytes[5..13],
            &[0xE4, 0x07, 0x0C, 0x0C, 0x0C, 0x0C, 0x00, 0x00]
        );
    }

    #[test]
    fn round_trip_goto() {
        let bytes = encode(OutboundCommand::GoTo {
            ra: 12.5,
            dec: -45.25,
        })
        .unwrap();
        // Only PositionReport/SiteLocationReport decode meaningfully; swap
        // the id byte to simulate the mount echoing the coordinate back.
        let mut echoed = bytes;
        echoed[4] = CommandId::PositionReport.into();
        match decode(&echoed) {
            InboundFrame::PositionReport { ra, dec } => {
                assert_float_absolute_eq!(ra, 12.5, 1e-6);
                assert_float_absolute_eq!(dec, -45.25, 1e-6);
            }
            other => panic!("unexpected decode {other:?}"),
        }
    }

    #[test]
    fn round_trip_site_location() {
        let bytes = encode(OutboundCommand::SetSiteLocation {
            lat: 33.75,
            lon: -117.125,
        })
        .unwrap();
        let mut echoed = bytes;
        echoed[4] = CommandId::SiteLocationReport.into();
        match decode(&echoed) {
            InboundFrame::SiteLocationReport { lat, lon } => {
                assert_float_absolute_eq!(lat, 33.75, 1e-6);
                assert_float_absolute_eq!(lon, -117.125, 1e-6);
            }
            other => panic!("unexpected decode {other:?}"),
        }
    }

    #[test]
    fn domain_rejection_ra() {
        assert!(matches!(
            encode(OutboundCommand::GoTo { ra: 24.0, dec: 0.0 }),
            Err(DriverError::Domain(_))
        ));
        assert!(matches!(
            encode(OutboundCommand::GoTo {
                ra: -0.001,
                dec: 0.0
            }),
            Err(DriverError::Domain(_))
        ));
    }

    #[test]
    fn domain_rejection_dec() {
        assert!(matches!(
            encode(OutboundCommand::GoTo {
                ra: 0.0,
                dec: 90.001
            }),
            Err(DriverError::Domain(_))
        ));
        assert!(matches!(
            encode(OutboundCommand::Sync {
                ra: 0.0,
                dec: -90.001
            }),
            Err(DriverError::Domain(_))
        ));
    }

    #[test]
    fn domain_rejection_site_location() {
        assert!(matches!(
            encode(OutboundCommand::SetSiteLocation {
                lat: 90.5,
                lon: 0.0
            }),
            Err(DriverError::Domain(_))
        ));
        assert!(matches!(
            encode(OutboundCommand::SetSiteLocation {
                lat: 0.0,
                lon: 180.5
            }),
            Err(DriverError::Domain(_))
        ));
    }

    #[test]
    fn domain_rejection_date_time() {
        assert!(matches!(
            encode(OutboundCommand::SetDateTime {
                year: 2020,
                month: 13,
                day: 1,
                hour: 0,
                minute: 0,
                second: 0,
            }),
            Err(DriverError::Domain(_))
        ));
        assert!(matches!(
            encode(OutboundCommand::SetDateTime {
                year: 2020,
                month: 1,
                day: 1,
                hour: 24,
                minute: 0,
                second: 0,
            }),
            Err(DriverError::Domain(_))
        ));
    }

    #[test]
    fn unknown_id_ignored_not_fatal() {
        let mut raw = [0u8; FRAME_LEN];
        raw[0..4].copy_from_slice(&HEADER);
        raw[4] = 0x7A; // not in the taxonomy
        assert_eq!(decode(&raw), InboundFrame::Ignored(0x7A));
    }
}
