//! GDEY075Z08 command definitions
//!
//! The panel controller interprets every byte sent with the D/C line low as an
//! opcode, and every byte sent with D/C high as a positional parameter of the
//! most recent opcode. There are no tagged fields: parameters must be sent in
//! exactly the documented order.
//!
//! ## Command Structure
//!
//! 1. Set DC low (command mode)
//! 2. Send the opcode byte
//! 3. Set DC high (data mode)
//! 4. Send the parameter bytes (if any), one at a time
//!
//! ## Example
//!
//! ```
//! use gdey075z08::Command;
//!
//! assert_eq!(u8::from(Command::PowerSetting), 0x01);
//! assert_eq!(Command::GetStatus.opcode(), 0x71);
//! ```

/// Panel command opcodes
///
/// The set is fixed by the panel vendor. Byte values are part of the wire
/// protocol and must never be renumbered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Command {
    /// Resolution, LUT source, scan direction and soft reset
    PanelSetting = 0x00,
    /// Internal/external power selection and voltage rails
    PowerSetting = 0x01,
    /// Power off following the power-off sequence. BUSY reads low until done.
    PowerOff = 0x02,
    /// Power-off sequence timing
    PowerOffSequenceSetting = 0x03,
    /// Power on following the power-on sequence. BUSY reads low until done.
    PowerOn = 0x04,
    /// Power on and measure the temperature sensor
    PowerOnMeasure = 0x05,
    /// Booster soft-start timing
    BoosterSoftStart = 0x06,
    /// Enter deep sleep. Requires the check code 0xA5; only a hardware reset wakes the panel.
    DeepSleep = 0x07,
    /// Start transmitting the black/white plane
    DataStartTransmission1 = 0x10,
    /// Stop data transmission
    DataStop = 0x11,
    /// Refresh the panel from display memory. BUSY reads low until done.
    DisplayRefresh = 0x12,
    /// Start transmitting the red plane
    DataStartTransmission2 = 0x13,
    /// VCOM LUT
    LutForVcom = 0x20,
    /// Blue LUT
    LutBlue = 0x21,
    /// White LUT
    LutWhite = 0x22,
    /// Gray 1 LUT
    LutGray1 = 0x23,
    /// Gray 2 LUT
    LutGray2 = 0x24,
    /// Red 0 LUT
    LutRed0 = 0x25,
    /// Red 1 LUT
    LutRed1 = 0x26,
    /// Red 2 LUT
    LutRed2 = 0x27,
    /// Red 3 LUT
    LutRed3 = 0x28,
    /// XON LUT
    LutXon = 0x29,
    /// Frame rate (PLL) control
    PllControl = 0x30,
    /// Temperature sensor command
    TemperatureSensorCommand = 0x40,
    /// Temperature sensor calibration
    TemperatureCalibration = 0x41,
    /// Write to an external temperature sensor
    TemperatureSensorWrite = 0x42,
    /// Read from an external temperature sensor
    TemperatureSensorRead = 0x43,
    /// VCOM and data interval setting
    VcomAndDataIntervalSetting = 0x50,
    /// Low power detection
    LowPowerDetection = 0x51,
    /// Source-to-gate / gate-to-source non-overlap period
    TconSetting = 0x60,
    /// Resolution setting
    TconResolution = 0x61,
    /// Host direct access to the external SPI flash
    SpiFlashControl = 0x65,
    /// LUT revision / chip revision
    Revision = 0x70,
    /// Read the controller status. Used to clock the BUSY line while polling.
    GetStatus = 0x71,
    /// Automatic VCOM measurement
    AutoMeasurementVcom = 0x80,
    /// Read the measured VCOM value
    ReadVcomValue = 0x81,
    /// VCOM DC level
    VcmDcSetting = 0x82,
}

impl Command {
    /// Returns the opcode byte sent on the wire
    pub const fn opcode(self) -> u8 {
        self as u8
    }
}

impl From<Command> for u8 {
    fn from(command: Command) -> Self {
        command.opcode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_and_sleep_opcodes() {
        assert_eq!(Command::PanelSetting.opcode(), 0x00);
        assert_eq!(Command::PowerSetting.opcode(), 0x01);
        assert_eq!(Command::PowerOff.opcode(), 0x02);
        assert_eq!(Command::PowerOffSequenceSetting.opcode(), 0x03);
        assert_eq!(Command::PowerOn.opcode(), 0x04);
        assert_eq!(Command::PowerOnMeasure.opcode(), 0x05);
        assert_eq!(Command::BoosterSoftStart.opcode(), 0x06);
        assert_eq!(Command::DeepSleep.opcode(), 0x07);
    }

    #[test]
    fn test_data_transmission_opcodes() {
        assert_eq!(Command::DataStartTransmission1.opcode(), 0x10);
        assert_eq!(Command::DataStop.opcode(), 0x11);
        assert_eq!(Command::DisplayRefresh.opcode(), 0x12);
        assert_eq!(Command::DataStartTransmission2.opcode(), 0x13);
    }

    #[test]
    fn test_lut_opcodes_are_contiguous() {
        let luts = [
            Command::LutForVcom,
            Command::LutBlue,
            Command::LutWhite,
            Command::LutGray1,
            Command::LutGray2,
            Command::LutRed0,
            Command::LutRed1,
            Command::LutRed2,
            Command::LutRed3,
            Command::LutXon,
        ];
        for (offset, lut) in luts.iter().enumerate() {
            assert_eq!(lut.opcode(), 0x20 + offset as u8);
        }
    }

    #[test]
    fn test_configuration_opcodes() {
        assert_eq!(Command::PllControl.opcode(), 0x30);
        assert_eq!(Command::TemperatureSensorCommand.opcode(), 0x40);
        assert_eq!(Command::TemperatureCalibration.opcode(), 0x41);
        assert_eq!(Command::TemperatureSensorWrite.opcode(), 0x42);
        assert_eq!(Command::TemperatureSensorRead.opcode(), 0x43);
        assert_eq!(Command::VcomAndDataIntervalSetting.opcode(), 0x50);
        assert_eq!(Command::LowPowerDetection.opcode(), 0x51);
        assert_eq!(Command::TconSetting.opcode(), 0x60);
        assert_eq!(Command::TconResolution.opcode(), 0x61);
        assert_eq!(Command::SpiFlashControl.opcode(), 0x65);
        assert_eq!(Command::Revision.opcode(), 0x70);
        assert_eq!(Command::GetStatus.opcode(), 0x71);
        assert_eq!(Command::AutoMeasurementVcom.opcode(), 0x80);
        assert_eq!(Command::ReadVcomValue.opcode(), 0x81);
        assert_eq!(Command::VcmDcSetting.opcode(), 0x82);
    }

    #[test]
    fn test_into_u8() {
        let byte: u8 = Command::DeepSleep.into();
        assert_eq!(byte, 0x07);
    }
}
