use tracing::debug;

use crate::error::RenderError;

/// Owns the wgpu instance, device, and queue for headless rendering.
///
/// Every GPU-side object created by the renderer lives on this device for
/// the duration of the run; there is no surface and no swapchain.
pub struct GpuContext {
    pub(crate) device: wgpu::Device,
    pub(crate) queue: wgpu::Queue,
    _instance: wgpu::Instance,
}

impl GpuContext {
    /// Picks the first suitable adapter and requests a device with
    /// downlevel default limits.
    pub fn new() -> Result<Self, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            flags: wgpu::InstanceFlags::default(),
            memory_budget_thresholds: wgpu::MemoryBudgetThresholds::default(),
            backend_options: wgpu::BackendOptions::default(),
        });

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .map_err(|err| RenderError::Setup(format!("no suitable GPU adapter: {err}")))?;

        let info = adapter.get_info();
        debug!(
            name = %info.name,
            backend = ?info.backend,
            device_type = ?info.device_type,
            "selected GPU adapter"
        );

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("triprobe device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_defaults(),
            memory_hints: wgpu::MemoryHints::MemoryUsage,
            trace: wgpu::Trace::default(),
        }))
        .map_err(|err| RenderError::Setup(format!("failed to create GPU device: {err}")))?;

        Ok(Self {
            device,
            queue,
            _instance: instance,
        })
    }
}
