use crossbeam_channel::bounded;
use tracing::debug;

use crate::error::RenderError;
use crate::output::{PixelBuffer, BYTES_PER_PIXEL};
use crate::RendererConfig;

use super::context::GpuContext;
use super::pipeline::PipelineState;
use super::resources;

/// GPU objects for the single frame, built once by `build_resources`.
struct FrameResources {
    pipeline: PipelineState,
    bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    render_target: wgpu::Texture,
    readback_buffer: wgpu::Buffer,
}

/// One-shot renderer: build resources, encode and submit a single pass,
/// wait, read the pixels back. Methods are meant to be called in that order
/// by an orchestrating caller; nothing here re-enters or loops.
pub struct Renderer {
    context: GpuContext,
    config: RendererConfig,
    resources: Option<FrameResources>,
}

impl Renderer {
    pub fn new(context: GpuContext, config: RendererConfig) -> Self {
        Self {
            context,
            config,
            resources: None,
        }
    }

    /// Builds every GPU object the frame needs: compiled pipeline, render
    /// target, mip probe texture, sampler, vertex buffer, and the staging
    /// buffer the pixels are read back through.
    pub fn build_resources(&mut self) -> Result<(), RenderError> {
        let device = &self.context.device;
        let (width, height) = (self.config.width, self.config.height);

        let pipeline = PipelineState::new(device, wgpu::TextureFormat::Rgba32Float)?;
        let render_target = resources::create_render_target(device, width, height)?;
        let mip_probe = resources::create_mip_probe_texture(device, width, height, 1)?;
        let sampler = resources::create_sampler(device)?;
        let vertex_buffer = resources::create_vertex_buffer(device);
        let readback_buffer = resources::create_readback_buffer(device, width, height);

        let probe_view = mip_probe.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("probe bind group"),
            layout: &pipeline.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&probe_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        debug!(width, height, "frame resources built");
        self.resources = Some(FrameResources {
            pipeline,
            bind_group,
            vertex_buffer,
            render_target,
            readback_buffer,
        });
        Ok(())
    }

    /// Records the single render pass (clear to opaque black, one draw of
    /// three vertices) plus the readback copy, and submits it all in one
    /// command buffer.
    pub fn encode_and_submit(&self) -> Result<wgpu::SubmissionIndex, RenderError> {
        let resources = self.resources.as_ref().ok_or_else(|| {
            RenderError::Setup("encode_and_submit called before build_resources".to_string())
        })?;
        let (width, height) = (self.config.width, self.config.height);

        let target_view = resources
            .render_target
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder =
            self.context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("triangle frame"),
                });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("triangle pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target_view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            render_pass.set_pipeline(&resources.pipeline.pipeline);
            render_pass.set_bind_group(0, &resources.bind_group, &[]);
            render_pass.set_vertex_buffer(0, resources.vertex_buffer.slice(..));
            render_pass.draw(0..3, 0..1);
        }
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &resources.render_target,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &resources.readback_buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(width * BYTES_PER_PIXEL),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );

        let index = self.context.queue.submit(std::iter::once(encoder.finish()));
        debug!("frame submitted");
        Ok(index)
    }

    /// Blocks the calling thread until the GPU signals completion of the
    /// given submission. No timeout.
    pub fn wait_for_completion(&self, index: wgpu::SubmissionIndex) -> Result<(), RenderError> {
        self.context
            .device
            .poll(wgpu::PollType::WaitForSubmissionIndex(index))
            .map_err(|err| RenderError::Setup(format!("wait for GPU completion failed: {err}")))?;
        Ok(())
    }

    /// Maps the staging buffer and copies mip level 0 of the render target,
    /// full extent, row stride width x 16 bytes, into a host-owned buffer.
    pub fn readback(&self) -> Result<PixelBuffer, RenderError> {
        let resources = self.resources.as_ref().ok_or_else(|| {
            RenderError::Setup("readback called before build_resources".to_string())
        })?;

        let slice = resources.readback_buffer.slice(..);
        let (sender, receiver) = bounded(1);
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });
        self.context
            .device
            .poll(wgpu::PollType::Wait)
            .map_err(|err| RenderError::Setup(format!("poll during readback failed: {err}")))?;
        receiver
            .recv()
            .map_err(|_| RenderError::Setup("readback map callback was dropped".to_string()))?
            .map_err(|err| RenderError::Setup(format!("failed to map readback buffer: {err}")))?;

        let data = {
            let mapped = slice.get_mapped_range();
            mapped.to_vec()
        };
        resources.readback_buffer.unmap();

        debug!(bytes = data.len(), "pixels read back");
        Ok(PixelBuffer::new(self.config.width, self.config.height, data))
    }
}
