use winit::dpi::PhysicalSize;

/// Depth texture sized to the surface.
pub struct DepthTarget {
    format: wgpu::TextureFormat,
    view: wgpu::TextureView,
    size: PhysicalSize<u32>,
}

impl DepthTarget {
    /// Creates a depth texture of `size` (each side clamped to at least 1).
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        size: PhysicalSize<u32>,
    ) -> Self {
        let size = PhysicalSize::new(size.width.max(1), size.height.max(1));

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("subroutines depth texture"),
            size: wgpu::Extent3d {
                width: size.width,
                height: size.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self { format, view, size }
    }

    /// Recreates the texture if `size` differs from the current one.
    pub fn resize(&mut self, device: &wgpu::Device, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 || size == self.size {
            return;
        }
        log::debug!("recreating depth texture: {}x{}", size.width, size.height);
        *self = Self::new(device, self.format, size);
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }
}
