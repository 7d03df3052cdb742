//! Device-to-host transfer seam.

use crate::error::Result;

/// Moves gradient buffers between the training device and the host
/// where the codec runs.
///
/// The harness times every call to this trait as transfer cost, so
/// implementations should do nothing but move data.
pub trait DeviceLink {
    /// Copy a device-resident buffer to host memory.
    fn to_host(&self, values: &[f32]) -> Result<Vec<f32>>;

    /// Copy a host buffer back to the device.
    fn to_device(&self, values: &[f32]) -> Result<Vec<f32>>;
}

/// In-process link: both sides live in host memory, transfers are
/// plain copies. The control configuration for timing comparisons.
#[derive(Debug, Default)]
pub struct HostLink;

impl DeviceLink for HostLink {
    fn to_host(&self, values: &[f32]) -> Result<Vec<f32>> {
        Ok(values.to_vec())
    }

    fn to_device(&self, values: &[f32]) -> Result<Vec<f32>> {
        Ok(values.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_link_copies() {
        let link = HostLink;
        let values = vec![1.0f32, -2.5, 3.25];
        assert_eq!(link.to_host(&values).unwrap(), values);
        assert_eq!(link.to_device(&values).unwrap(), values);
    }
}
