//! Registry owning every device instance.
//!
//! The registry is built once at startup from a [`DeviceConfig`], lives as
//! long as the host needs the devices, and is torn down with
//! [`DeviceRegistry::shutdown`]. Handles carry the index of the instance
//! they were opened on, so reads and writes route without a lookup key.

use crate::config::DeviceConfig;
use crate::device::{
    DeviceError, DeviceInstance, InstanceSnapshot, OpenFile, UserSlice, UserSliceMut,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

/// Status of every instance at one point in time.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegistrySnapshot {
    pub taken_at: DateTime<Utc>,
    pub devices: Vec<InstanceSnapshot>,
}

/// Collection of independent selector devices.
#[derive(Debug)]
pub struct DeviceRegistry {
    config: DeviceConfig,
    devices: Vec<DeviceInstance>,
}

impl DeviceRegistry {
    /// Validate `config` and construct one instance per configured slot.
    ///
    /// Instance storage is reserved up front. A failed reservation is reported
    /// as [`DeviceError::AllocationFailure`] (`ENOMEM`) before any instance is
    /// built; validation caps the count, so this only happens when the host is
    /// out of memory.
    pub fn new(config: DeviceConfig) -> Result<Self, DeviceError> {
        config.validate()?;

        let count = config.instance_count;
        let mut devices = Vec::new();
        devices
            .try_reserve_exact(count)
            .map_err(|_| DeviceError::AllocationFailure { requested: count })?;

        let options = config.device_options();
        for index in 0..count {
            devices.push(DeviceInstance::new(
                index,
                config.device_name(index),
                options.clone(),
            ));
        }

        info!(count, base_name = %config.base_name, "registered devices");
        Ok(Self { config, devices })
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeviceInstance> {
        self.devices.iter()
    }

    /// Instance at `index`.
    pub fn device(&self, index: usize) -> Result<&DeviceInstance, DeviceError> {
        self.devices.get(index).ok_or(DeviceError::NoSuchDevice {
            index,
            count: self.devices.len(),
        })
    }

    /// Open a handle on the instance at `index`.
    pub fn open(&self, index: usize) -> Result<OpenFile, DeviceError> {
        Ok(self.device(index)?.open())
    }

    pub fn close(&self, file: OpenFile) -> Result<(), DeviceError> {
        self.device(file.index())?.close(file)
    }

    pub fn read(
        &self,
        file: &mut OpenFile,
        output: UserSliceMut<'_>,
    ) -> Result<usize, DeviceError> {
        self.device(file.index())?.read(file, output)
    }

    pub fn write(&self, file: &mut OpenFile, input: UserSlice<'_>) -> Result<usize, DeviceError> {
        self.device(file.index())?.write(file, input)
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            taken_at: Utc::now(),
            devices: self.devices.iter().map(DeviceInstance::snapshot).collect(),
        }
    }

    /// Tear down every instance in index order.
    pub fn shutdown(self) {
        for device in &self.devices {
            debug!(
                device = device.name(),
                open_handles = device.open_handles(),
                "removing device"
            );
        }
        info!(count = self.devices.len(), "unregistered devices");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigError, DeviceConfigBuilder};
    use tracing_test::traced_test;

    fn registry(count: usize) -> DeviceRegistry {
        let config = DeviceConfigBuilder::new().instances(count).build().unwrap();
        DeviceRegistry::new(config).unwrap()
    }

    fn read_text(registry: &DeviceRegistry, file: &mut OpenFile) -> String {
        let mut buf = [0u8; 32];
        let n = registry.read(file, (&mut buf).into()).unwrap();
        String::from_utf8_lossy(&buf[..n]).into_owned()
    }

    #[test]
    fn registry_builds_named_instances() {
        let registry = registry(3);
        assert_eq!(registry.len(), 3);
        let names: Vec<&str> = registry.iter().map(DeviceInstance::name).collect();
        assert_eq!(names, vec!["chardevice0", "chardevice1", "chardevice2"]);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = DeviceConfig {
            instance_count: 0,
            ..DeviceConfig::default()
        };
        let err = DeviceRegistry::new(config).unwrap_err();
        assert!(matches!(err, DeviceError::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn out_of_range_index_is_no_such_device() {
        let registry = registry(2);
        let err = registry.open(2).unwrap_err();
        assert!(matches!(err, DeviceError::NoSuchDevice { index: 2, count: 2 }));
    }

    #[test]
    fn instances_are_isolated() {
        let registry = registry(2);
        let mut a = registry.open(0).unwrap();
        let mut b = registry.open(1).unwrap();

        registry.write(&mut a, "1".into()).unwrap();

        assert_eq!(read_text(&registry, &mut a), "FIRST!");
        assert_eq!(read_text(&registry, &mut b), "NOT DEFINED!");
    }

    #[test]
    fn handles_route_to_their_instance() {
        let registry = registry(2);
        let mut file = registry.open(1).unwrap();
        registry.write(&mut file, "3".into()).unwrap();
        registry.close(file).unwrap();

        assert_eq!(registry.device(0).unwrap().selector().byte(), b'0');
        assert_eq!(registry.device(1).unwrap().selector().byte(), b'3');
        assert_eq!(registry.device(1).unwrap().open_handles(), 0);
    }

    #[test]
    fn snapshot_covers_every_instance() {
        let registry = registry(2);
        let mut file = registry.open(0).unwrap();
        registry.write(&mut file, "2".into()).unwrap();

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.devices.len(), 2);
        assert_eq!(snapshot.devices[0].response, "SECOND!");
        assert_eq!(snapshot.devices[1].response, "NOT DEFINED!");

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["devices"][0]["name"], "chardevice0");
        assert_eq!(json["devices"][0]["selector"], 50);
        assert_eq!(json["devices"][0]["open_handles"], 1);
    }

    #[traced_test]
    #[test]
    fn lifecycle_is_logged() {
        let registry = registry(2);
        registry.shutdown();
        assert!(logs_contain("registered devices"));
        assert!(logs_contain("removing device"));
        assert!(logs_contain("unregistered devices"));
    }

    #[test]
    fn storage_failure_reports_out_of_memory() {
        let err = DeviceError::AllocationFailure { requested: 4 };
        assert_eq!(err.errno(), crate::device::ENOMEM);
        assert_eq!(err.to_string(), "Could not allocate storage for 4 devices");
        assert!(!err.is_retryable());
    }
}
