use std::sync::Arc;

use wgpu::{CommandEncoder, Device, Instance, Queue, TextureFormat, TextureView};

use crate::error::Result;
use crate::layout::Size;

/// Adapter, device and queue shared by every item rendered into a target.
pub struct GpuContext {
    pub adapter: wgpu::Adapter,
    pub device: Arc<Device>,
    pub queue: Arc<Queue>,
}

impl GpuContext {
    /// Acquire a device without a presentation surface.
    pub fn new() -> Result<Self> {
        let instance = Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))?;

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("Tessella Device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_defaults(),
            memory_hints: wgpu::MemoryHints::default(),
            experimental_features: wgpu::ExperimentalFeatures::default(),
            trace: wgpu::Trace::Off,
        }))?;

        log::info!("Using GPU adapter: {:?}", adapter.get_info().name);

        Ok(Self {
            adapter,
            device: Arc::new(device),
            queue: Arc::new(queue),
        })
    }

    /// Create a texture that items can render into without a window.
    pub fn create_offscreen(&self, width: u32, height: u32, format: TextureFormat) -> Offscreen {
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Tessella Offscreen Target"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Offscreen {
            texture,
            view,
            format,
        }
    }

    /// Record one frame into `view` and submit it.
    pub fn render_to<F>(&self, view: &TextureView, viewport: Size, scale_factor: f32, record: F)
    where
        F: FnOnce(&mut FrameTarget<'_>),
    {
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Tessella Frame Encoder"),
            });
        {
            let mut frame = FrameTarget {
                device: &self.device,
                queue: &self.queue,
                encoder: &mut encoder,
                view,
                viewport,
                scale_factor,
            };
            record(&mut frame);
        }
        self.queue.submit(std::iter::once(encoder.finish()));
    }
}

pub struct Offscreen {
    pub texture: wgpu::Texture,
    pub view: TextureView,
    pub format: TextureFormat,
}

/// Everything an item needs to draw itself during one frame.
pub struct FrameTarget<'a> {
    pub device: &'a Device,
    pub queue: &'a Queue,
    pub encoder: &'a mut CommandEncoder,
    pub view: &'a TextureView,
    /// Target size in physical pixels
    pub viewport: Size,
    pub scale_factor: f32,
}
