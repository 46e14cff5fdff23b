//! Sample instrument catalog loaded at startup

use chrono::{DateTime, TimeZone, Utc};

use crate::models::{CalibrationStatus, CreateAsset, MaintenanceStatus};

fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn instrument(
    code: &str,
    name: &str,
    description: &str,
    location: &str,
    category: &str,
    calibration_status: CalibrationStatus,
    last_calibrated: DateTime<Utc>,
    next_due: DateTime<Utc>,
) -> CreateAsset {
    CreateAsset {
        asset_id: code.to_string(),
        name: name.to_string(),
        description: Some(description.to_string()),
        location: location.to_string(),
        category: category.to_string(),
        calibration_status,
        last_calibrated,
        next_due,
        is_available: Some(true),
        maintenance_status: None,
        estimated_return: None,
    }
}

pub fn sample_assets() -> Vec<CreateAsset> {
    vec![
        instrument(
            "OSC-001",
            "Keysight DSOX1204G Oscilloscope",
            "4-channel, 200 MHz digital oscilloscope with 2 GSa/s sampling rate",
            "Lab B-204",
            "Oscilloscopes",
            CalibrationStatus::Calibrated,
            day(2024, 11, 15),
            day(2025, 11, 15),
        ),
        instrument(
            "DMM-003",
            "Fluke 8845A Precision Multimeter",
            "6.5-digit precision multimeter with 0.0024% basic DCV accuracy",
            "Lab A-101",
            "Multimeters",
            CalibrationStatus::DueSoon,
            day(2024, 1, 20),
            day(2025, 1, 20),
        ),
        instrument(
            "PSU-002",
            "Keysight E36313A Power Supply",
            "Triple-output DC power supply, 6V/5A, ±25V/1A",
            "Lab C-305",
            "Power Supplies",
            CalibrationStatus::Calibrated,
            day(2024, 8, 10),
            day(2025, 8, 10),
        ),
        CreateAsset {
            is_available: Some(false),
            maintenance_status: Some(MaintenanceStatus::Maintenance),
            estimated_return: Some(day(2024, 12, 28)),
            ..instrument(
                "SIG-001",
                "Rohde & Schwarz SMC100A Signal Generator",
                "RF signal generator, 9 kHz to 1.1 GHz",
                "Lab B-204",
                "Signal Generators",
                CalibrationStatus::Calibrated,
                day(2024, 9, 5),
                day(2025, 9, 5),
            )
        },
        instrument(
            "OSC-002",
            "Tektronix MSO46 Mixed Signal Oscilloscope",
            "4-channel, 1 GHz bandwidth with 16 digital channels",
            "Lab A-101",
            "Oscilloscopes",
            CalibrationStatus::Calibrated,
            day(2024, 10, 12),
            day(2025, 10, 12),
        ),
        instrument(
            "DMM-004",
            "Keysight 34465A Digital Multimeter",
            "6.5-digit bench multimeter with Truevolt technology",
            "Lab C-305",
            "Multimeters",
            CalibrationStatus::Calibrated,
            day(2024, 9, 20),
            day(2025, 9, 20),
        ),
    ]
}
