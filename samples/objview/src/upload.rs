//! A GPU device with no surface attached, for uploading without a window.

#[derive(Debug, thiserror::Error)]
pub enum GpuError {
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    #[error(transparent)]
    RequestDevice(#[from] wgpu::RequestDeviceError),
}

#[derive(Debug)]
pub struct Headless {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

impl Headless {
    pub async fn new() -> Result<Self, GpuError> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: None,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;

        let info = adapter.get_info();
        tracing::info!(
            adapter = info.name.as_str(),
            backend = ?info.backend,
            "selected GPU adapter"
        );

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("objview"),
                    ..Default::default()
                },
                None,
            )
            .await?;
        Ok(Self { device, queue })
    }

    /// Block until every submitted upload has reached the device.
    pub fn flush(&self) {
        self.queue.submit(std::iter::empty());
        if let wgpu::MaintainResult::Ok = self.device.poll(wgpu::Maintain::Wait) {
            tracing::trace!("device idle");
        }
    }
}
