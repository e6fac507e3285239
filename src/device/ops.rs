//! Host-facing character device interface.

use super::error::DeviceError;
use super::file::OpenFile;
use super::user::{UserSlice, UserSliceMut};

/// Character device interface
///
/// The four entry points a host (kernel shim, user-space server, test
/// harness) drives a device through. Implementations use interior locking,
/// so every method takes `&self` and the trait is object safe.
pub trait CharDevice: Send + Sync {
    /// Device name, e.g. `chardevice0`
    fn name(&self) -> &str;

    /// Bind a new handle to the device
    fn open(&self) -> OpenFile;

    /// Release a handle
    fn close(&self, file: OpenFile) -> Result<(), DeviceError>;

    /// Copy the device's current response into `output`
    ///
    /// # Returns
    ///
    /// Number of bytes produced
    fn read(&self, file: &mut OpenFile, output: UserSliceMut<'_>) -> Result<usize, DeviceError>;

    /// Hand `input` to the device
    ///
    /// # Returns
    ///
    /// Number of bytes the device reports as consumed
    fn write(&self, file: &mut OpenFile, input: UserSlice<'_>) -> Result<usize, DeviceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{DeviceInstance, DeviceOptions};

    fn drive(device: &dyn CharDevice, input: &str) -> Result<String, DeviceError> {
        let mut file = device.open();
        device.write(&mut file, input.into())?;
        let mut buf = vec![0u8; 32];
        let n = device.read(&mut file, (&mut buf).into())?;
        device.close(file)?;
        Ok(String::from_utf8_lossy(&buf[..n]).into_owned())
    }

    #[test]
    fn instance_is_usable_as_trait_object() {
        let device = DeviceInstance::new(0, "chardevice0", DeviceOptions::default());
        assert_eq!(drive(&device, "3").unwrap(), "THIRD!");
        assert_eq!(CharDevice::name(&device), "chardevice0");
    }

    #[test]
    fn boxed_devices_share_the_interface() {
        let devices: Vec<Box<dyn CharDevice>> = vec![
            Box::new(DeviceInstance::new(0, "chardevice0", DeviceOptions::default())),
            Box::new(DeviceInstance::new(1, "chardevice1", DeviceOptions::default())),
        ];
        assert_eq!(drive(devices[0].as_ref(), "1").unwrap(), "FIRST!");
        assert_eq!(drive(devices[1].as_ref(), "7").unwrap(), "NOT DEFINED!");
    }
}
