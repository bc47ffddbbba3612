use std::collections::HashSet;

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

use crate::assets::{AssetCache, AssetError, FontId, ShaderId, TextureData, TextureId};
use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::render::{
    Affine2, Backend, Camera2D, CircleLinesCmd, RectangleCmd, RectangleLinesCmd, TextCmd,
    TextureCmd,
};

use super::atlas::{GlyphAtlas, ATLAS_SIZE};
use super::common::{
    logical_clip_to_scissor, premul_alpha_blend, viewport_ubo_min_binding_size, ViewportUniform,
    PRELUDE_WGSL, SPRITE_FS_WGSL,
};
use super::mesh::{
    outline_strips, placed_corners, rect_corners, ring_quads, source_uvs, MeshBuilder,
    TextureSlot, Vertex,
};
use super::{RenderCtx, RenderTarget};

/// Stroke width of `draw_circle_lines`, in pixels.
const CIRCLE_LINE_WIDTH: f32 = 1.0;

struct TextureEntry {
    data: TextureData,
    gpu: Option<GpuTexture>,
}

struct GpuTexture {
    _texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

struct ShaderEntry {
    fragment: String,
    pipeline: Option<wgpu::RenderPipeline>,
}

/// Pipeline objects tied to one target format.
struct GpuResources {
    format: wgpu::TextureFormat,
    texture_bgl: wgpu::BindGroupLayout,
    pipeline_layout: wgpu::PipelineLayout,
    sampler: wgpu::Sampler,
    viewport_ubo: wgpu::Buffer,
    viewport_bind_group: wgpu::BindGroup,
    default_pipeline: wgpu::RenderPipeline,
    atlas_texture: wgpu::Texture,
    atlas_bind_group: wgpu::BindGroup,

    vbo: Option<wgpu::Buffer>,
    vbo_capacity: usize,
    ibo: Option<wgpu::Buffer>,
    ibo_capacity: usize,
}

/// wgpu implementation of [`Backend`].
///
/// Backend calls are tessellated on the CPU into one vertex stream. Entity
/// geometry is transformed by the camera at tessellation time, so the GPU
/// only ever sees screen-space vertices. [`render`](Self::render) uploads the
/// frame and draws every batch in order in a single pass, then resets.
///
/// Scissor rects are screen-space and nest by intersection. Shader scopes
/// select a pipeline built from the shared prelude (`vs_main` + bindings)
/// and the registered fragment source, which must define `fs_main(in: VsOut)`.
///
/// Assets are registered here under names; the returned ids are what draw
/// instructions carry. An id with no registered asset is skipped with a
/// one-time warning.
pub struct GpuBackend {
    mesh: MeshBuilder,
    atlas: GlyphAtlas,
    layout: Layout<()>,
    clear: Option<Color>,

    textures: AssetCache<TextureId, TextureEntry>,
    fonts: AssetCache<FontId, fontdue::Font>,
    shaders: AssetCache<ShaderId, ShaderEntry>,
    warned: HashSet<String>,

    resources: Option<GpuResources>,
}

impl Default for GpuBackend {
    fn default() -> Self {
        Self {
            mesh: MeshBuilder::default(),
            atlas: GlyphAtlas::new(ATLAS_SIZE),
            layout: Layout::new(CoordinateSystem::PositiveYDown),
            clear: None,
            textures: AssetCache::new(),
            fonts: AssetCache::new(),
            shaders: AssetCache::new(),
            warned: HashSet::new(),
            resources: None,
        }
    }
}

impl GpuBackend {
    pub fn new() -> Self {
        Self::default()
    }

    // ── assets ────────────────────────────────────────────────────────────

    /// Registers (or replaces) a texture. Uploaded on the next `render`.
    pub fn load_texture(&mut self, name: impl Into<String>, data: TextureData) -> TextureId {
        self.textures.insert(name, TextureEntry { data, gpu: None })
    }

    /// Decodes an encoded image (PNG, JPEG, BMP) and registers it.
    pub fn load_texture_bytes(&mut self, name: impl Into<String>, bytes: &[u8]) -> Result<TextureId, AssetError> {
        let data = TextureData::decode(bytes)?;
        Ok(self.load_texture(name, data))
    }

    /// Parses and registers a TrueType / OpenType font.
    pub fn load_font(&mut self, name: impl Into<String>, bytes: &[u8]) -> Result<FontId, AssetError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| AssetError::Decode { kind: "font", reason: e.to_string() })?;
        Ok(self.fonts.insert(name, font))
    }

    /// Registers (or replaces) a fragment shader. See the type docs for the interface.
    pub fn load_shader(&mut self, name: impl Into<String>, fragment_wgsl: impl Into<String>) -> ShaderId {
        self.shaders.insert(name, ShaderEntry { fragment: fragment_wgsl.into(), pipeline: None })
    }

    pub fn texture(&self, name: &str) -> Result<TextureId, AssetError> {
        self.textures.id(name)
    }

    pub fn font(&self, name: &str) -> Result<FontId, AssetError> {
        self.fonts.id(name)
    }

    pub fn shader(&self, name: &str) -> Result<ShaderId, AssetError> {
        self.shaders.id(name)
    }

    /// Texel size of a registered texture.
    pub fn texture_size(&self, id: TextureId) -> Option<(u32, u32)> {
        self.textures.get(id).map(|t| (t.data.width, t.data.height))
    }

    // ── frame ─────────────────────────────────────────────────────────────

    /// Draws everything recorded since the last call into `target`, then resets.
    ///
    /// If `clear` was called this frame the pass clears first; otherwise it
    /// loads the existing contents.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        self.ensure_resources(ctx);
        self.upload_atlas(ctx);
        self.upload_textures(ctx);
        self.ensure_shader_pipelines(ctx);
        self.write_viewport_uniform(ctx);
        self.upload_geometry(ctx);

        self.encode(ctx, target);

        self.mesh.reset();
        self.clear = None;
    }

    fn encode(&self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        let Some(res) = self.resources.as_ref() else { return };
        if !ctx.viewport.is_valid() {
            log::warn!("skipping frame for invalid viewport {:?}", ctx.viewport);
            return;
        }

        let load = match self.clear {
            Some(c) => wgpu::LoadOp::Clear(wgpu::Color {
                r: c.r as f64,
                g: c.g as f64,
                b: c.b as f64,
                a: c.a as f64,
            }),
            None => wgpu::LoadOp::Load,
        };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("ember frame pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations { load, store: wgpu::StoreOp::Store },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        if self.mesh.is_empty() {
            return;
        }
        let (Some(vbo), Some(ibo)) = (res.vbo.as_ref(), res.ibo.as_ref()) else { return };

        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint32);
        rpass.set_bind_group(0, &res.viewport_bind_group, &[]);

        for batch in &self.mesh.batches {
            let pipeline = batch
                .key
                .shader
                .and_then(|id| self.shaders.get(id))
                .and_then(|s| s.pipeline.as_ref())
                .unwrap_or(&res.default_pipeline);

            let bind_group = match batch.key.texture {
                TextureSlot::Atlas => &res.atlas_bind_group,
                TextureSlot::Texture(id) => {
                    match self.textures.get(id).and_then(|t| t.gpu.as_ref()) {
                        Some(gpu) => &gpu.bind_group,
                        None => continue,
                    }
                }
            };

            let Some((sx, sy, sw, sh)) =
                logical_clip_to_scissor(batch.key.clip, ctx.viewport, ctx.scale_factor)
            else {
                continue;
            };

            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(1, bind_group, &[]);
            rpass.set_scissor_rect(sx, sy, sw, sh);
            rpass.draw_indexed(batch.indices.clone(), 0, 0..1);
        }
    }

    // ── lazy-init / upload helpers ────────────────────────────────────────

    fn ensure_resources(&mut self, ctx: &RenderCtx<'_>) {
        if self.resources.as_ref().is_some_and(|r| r.format == ctx.surface_format) {
            return;
        }
        log::debug!("building ember pipelines for {:?}", ctx.surface_format);

        let device = ctx.device;

        let viewport_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("ember viewport bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: Some(viewport_ubo_min_binding_size()),
                },
                count: None,
            }],
        });

        let texture_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("ember texture bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("ember pipeline layout"),
            bind_group_layouts: &[&viewport_bgl, &texture_bgl],
            immediate_size: 0,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("ember sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let viewport_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("ember viewport ubo"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let viewport_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("ember viewport bind group"),
            layout: &viewport_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        let default_pipeline = create_pipeline(
            device,
            &pipeline_layout,
            ctx.surface_format,
            &format!("{PRELUDE_WGSL}\n{SPRITE_FS_WGSL}"),
            "ember sprite",
        );

        let atlas_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("ember glyph atlas"),
            size: wgpu::Extent3d {
                width: self.atlas.size(),
                height: self.atlas.size(),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let atlas_view = atlas_texture.create_view(&wgpu::TextureViewDescriptor::default());
        let atlas_bind_group =
            texture_bind_group(device, &texture_bgl, &atlas_view, &sampler, "ember atlas bind group");

        self.resources = Some(GpuResources {
            format: ctx.surface_format,
            texture_bgl,
            pipeline_layout,
            sampler,
            viewport_ubo,
            viewport_bind_group,
            default_pipeline,
            atlas_texture,
            atlas_bind_group,
            vbo: None,
            vbo_capacity: 0,
            ibo: None,
            ibo_capacity: 0,
        });

        // Everything bound to the old layouts / format must be rebuilt.
        for (_, entry) in self.textures.iter_mut() {
            entry.gpu = None;
        }
        for (_, entry) in self.shaders.iter_mut() {
            entry.pipeline = None;
        }
        self.atlas.mark_dirty();
    }

    fn upload_atlas(&mut self, ctx: &RenderCtx<'_>) {
        let Some(res) = self.resources.as_ref() else { return };
        if !self.atlas.take_dirty() {
            return;
        }
        let size = self.atlas.size();
        write_rgba(ctx.queue, &res.atlas_texture, self.atlas.pixels(), size, size);
    }

    fn upload_textures(&mut self, ctx: &RenderCtx<'_>) {
        let Some(res) = self.resources.as_ref() else { return };

        for (id, entry) in self.textures.iter_mut() {
            if entry.gpu.is_some() {
                continue;
            }
            let (w, h) = (entry.data.width.max(1), entry.data.height.max(1));
            let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
                label: Some("ember texture"),
                size: wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            });

            let pixels = entry.data.premultiplied();
            if pixels.len() == (w * h * 4) as usize {
                write_rgba(ctx.queue, &texture, &pixels, w, h);
            } else {
                log::warn!("texture {id:?}: pixel buffer does not match {w}×{h}; left blank");
            }

            let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
            let bind_group =
                texture_bind_group(ctx.device, &res.texture_bgl, &view, &res.sampler, "ember texture bind group");
            entry.gpu = Some(GpuTexture { _texture: texture, bind_group });
        }
    }

    fn ensure_shader_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        let Some(res) = self.resources.as_ref() else { return };

        for (id, entry) in self.shaders.iter_mut() {
            if entry.pipeline.is_some() {
                continue;
            }
            log::debug!("compiling shader {id:?}");
            entry.pipeline = Some(create_pipeline(
                ctx.device,
                &res.pipeline_layout,
                res.format,
                &format!("{PRELUDE_WGSL}\n{}", entry.fragment),
                "ember custom shader",
            ));
        }
    }

    fn write_viewport_uniform(&mut self, ctx: &RenderCtx<'_>) {
        let Some(res) = self.resources.as_ref() else { return };
        let size = ctx.viewport.size();
        let u = ViewportUniform { viewport: [size.x.max(1.0), size.y.max(1.0)], _pad: [0.0; 2] };
        ctx.queue.write_buffer(&res.viewport_ubo, 0, bytemuck::bytes_of(&u));
    }

    fn upload_geometry(&mut self, ctx: &RenderCtx<'_>) {
        let Some(res) = self.resources.as_mut() else { return };
        if self.mesh.is_empty() {
            return;
        }

        let vertices = self.mesh.vertices.len();
        if vertices > res.vbo_capacity || res.vbo.is_none() {
            let cap = vertices.next_power_of_two().max(256);
            res.vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("ember vertex buffer"),
                size: (cap * std::mem::size_of::<Vertex>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            res.vbo_capacity = cap;
        }

        let indices = self.mesh.indices.len();
        if indices > res.ibo_capacity || res.ibo.is_none() {
            let cap = indices.next_power_of_two().max(384);
            res.ibo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("ember index buffer"),
                size: (cap * std::mem::size_of::<u32>()) as u64,
                usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            res.ibo_capacity = cap;
        }

        if let (Some(vbo), Some(ibo)) = (res.vbo.as_ref(), res.ibo.as_ref()) {
            ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(&self.mesh.vertices));
            ctx.queue.write_buffer(ibo, 0, bytemuck::cast_slice(&self.mesh.indices));
        }
    }

    fn warn_once(&mut self, key: String) {
        if self.warned.insert(key.clone()) {
            log::warn!("{key}; draws using it are skipped");
        }
    }
}

impl Backend for GpuBackend {
    fn clear(&mut self, color: Color) {
        self.clear = Some(color);
    }

    fn begin_camera(&mut self, camera: &Camera2D) {
        self.mesh.set_transform(camera.transform());
    }

    fn end_camera(&mut self) {
        self.mesh.set_transform(Affine2::IDENTITY);
    }

    fn draw_rectangle(&mut self, cmd: &RectangleCmd) {
        let corners = placed_corners(cmd.rect, cmd.origin, cmd.rotation);
        let white = self.atlas.white_uv();
        self.mesh.solid_quad(corners, white, cmd.color);
    }

    fn draw_rectangle_lines(&mut self, cmd: &RectangleLinesCmd) {
        let white = self.atlas.white_uv();
        for strip in outline_strips(cmd.rect, cmd.border_width) {
            if !strip.is_empty() {
                self.mesh.solid_quad(rect_corners(strip), white, cmd.color);
            }
        }
    }

    fn draw_circle_lines(&mut self, cmd: &CircleLinesCmd) {
        let white = self.atlas.white_uv();
        for quad in ring_quads(cmd.center, cmd.radius, CIRCLE_LINE_WIDTH) {
            self.mesh.solid_quad(quad, white, cmd.color);
        }
    }

    fn draw_texture(&mut self, cmd: &TextureCmd) {
        let Some((w, h)) = self.texture_size(cmd.texture) else {
            self.warn_once(format!("texture {:?} is not registered", cmd.texture));
            return;
        };
        let uvs = source_uvs(cmd.src, w.max(1) as f32, h.max(1) as f32);
        let corners = placed_corners(cmd.dst, cmd.origin, cmd.rotation);
        self.mesh.quad(TextureSlot::Texture(cmd.texture), corners, uvs, cmd.tint);
    }

    fn draw_text(&mut self, cmd: &TextCmd) {
        let Some(font) = self.fonts.get(cmd.font) else {
            self.warn_once(format!("font {:?} is not registered", cmd.font));
            return;
        };
        if cmd.text.is_empty() || cmd.font_size <= 0.0 {
            return;
        }

        self.layout.reset(&LayoutSettings::default());
        self.layout.append(&[font], &TextStyle::new(&cmd.text, cmd.font_size, 0));

        let place = |p: Vec2| (p - cmd.origin).rotated(cmd.rotation) + cmd.position;
        let mut column = 0u32;

        for g in self.layout.glyphs() {
            if g.parent == '\n' {
                column = 0;
                continue;
            }
            let col = column;
            column += 1;
            if !g.char_data.rasterize() || g.width == 0 || g.height == 0 {
                continue;
            }

            let region = match self.atlas.glyph(&g.key) {
                Some(region) => region,
                None => {
                    let (metrics, coverage) = font.rasterize_config(g.key);
                    if metrics.width == 0 || metrics.height == 0 {
                        continue;
                    }
                    let Some(region) = self.atlas.insert_glyph(
                        g.key,
                        &coverage,
                        metrics.width as u32,
                        metrics.height as u32,
                    ) else {
                        continue;
                    };
                    region
                }
            };

            let glyph = Rect::new(g.x + cmd.spacing * col as f32, g.y, g.width as f32, g.height as f32);
            let corners = rect_corners(glyph).map(place);
            let (u0, v0) = (region.uv_min[0], region.uv_min[1]);
            let (u1, v1) = (region.uv_max[0], region.uv_max[1]);
            self.mesh.quad(TextureSlot::Atlas, corners, [[u0, v0], [u1, v0], [u1, v1], [u0, v1]], cmd.color);
        }
    }

    fn begin_shader_mode(&mut self, shader: ShaderId) {
        if self.shaders.get(shader).is_none() {
            self.warn_once(format!("shader {shader:?} is not registered; using the default pipeline"));
        }
        self.mesh.push_shader(shader);
    }

    fn end_shader_mode(&mut self) {
        self.mesh.pop_shader();
    }

    fn begin_scissor_mode(&mut self, rect: Rect) {
        self.mesh.push_clip(rect);
    }

    fn end_scissor_mode(&mut self) {
        self.mesh.pop_clip();
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    format: wgpu::TextureFormat,
    source: &str,
    label: &str,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[Vertex::layout()],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(premul_alpha_blend()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            // Rotation and mirroring flip winding; never cull.
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

fn texture_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
    label: &str,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry { binding: 0, resource: wgpu::BindingResource::TextureView(view) },
            wgpu::BindGroupEntry { binding: 1, resource: wgpu::BindingResource::Sampler(sampler) },
        ],
    })
}

fn write_rgba(queue: &wgpu::Queue, texture: &wgpu::Texture, pixels: &[u8], w: u32, h: u32) {
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        pixels,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * w),
            rows_per_image: Some(h),
        },
        wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::srgb_to_linear;
    use crate::render::{RenderQueue, Source};

    #[test]
    fn rectangle_lines_emit_four_strips() {
        let mut backend = GpuBackend::new();
        backend.draw_rectangle_lines(&RectangleLinesCmd {
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            border_width: 1.0,
            color: Color::white(),
        });
        assert_eq!(backend.mesh.vertices.len(), 16);
        assert_eq!(backend.mesh.batches.len(), 1);
    }

    #[test]
    fn unregistered_texture_is_skipped_and_warned_once() {
        let mut backend = GpuBackend::new();
        let cmd = TextureCmd {
            texture: TextureId::from_raw(9),
            src: Rect::new(0.0, 0.0, 1.0, 1.0),
            dst: Rect::new(0.0, 0.0, 1.0, 1.0),
            origin: Vec2::zero(),
            rotation: 0.0,
            tint: Color::white(),
        };
        backend.draw_texture(&cmd);
        backend.draw_texture(&cmd);
        assert!(backend.mesh.is_empty());
        assert_eq!(backend.warned.len(), 1);
    }

    #[test]
    fn registered_texture_uses_its_own_batch() {
        let mut backend = GpuBackend::new();
        let id = backend.load_texture("checker", TextureData::solid(4, 4, Color::white()));
        assert_eq!(backend.texture("checker"), Ok(id));
        assert_eq!(backend.texture_size(id), Some((4, 4)));

        let mut q = RenderQueue::new();
        q.fill_rectangle(Rect::new(0.0, 0.0, 2.0, 2.0), Color::white(), Source::Ui, 0.0);
        q.draw_texture(
            id,
            Rect::new(0.0, 0.0, -4.0, 4.0),
            Rect::new(0.0, 0.0, 8.0, 8.0),
            Vec2::zero(),
            0.0,
            Color::white(),
            Source::Ui,
            1.0,
        );
        q.flush(&Camera2D::default(), &mut backend);

        let slots: Vec<_> = backend.mesh.batches.iter().map(|b| b.key.texture).collect();
        assert_eq!(slots, [TextureSlot::Atlas, TextureSlot::Texture(id)]);
        // Mirrored source: the top-left vertex samples the right edge.
        assert_eq!(backend.mesh.vertices[4].uv, [1.0, 0.0]);
    }

    #[test]
    fn solid_texture_matches_solid_fill_color() {
        let c = Color::from_srgb_u8(128, 64, 200, 255);
        let mut backend = GpuBackend::new();
        let id = backend.load_texture("swatch", TextureData::solid(1, 1, c));

        let mut q = RenderQueue::new();
        q.fill_rectangle(Rect::new(0.0, 0.0, 1.0, 1.0), c, Source::Ui, 0.0);
        q.flush(&Camera2D::default(), &mut backend);
        let fill = backend.mesh.vertices[0].color;

        // Bytes as uploaded to the sRGB texture, decoded the way the sampler does.
        let texel = backend.textures.get(id).map(|t| t.data.premultiplied()).unwrap_or_default();
        for (channel, byte) in texel[..3].iter().enumerate() {
            let sampled = srgb_to_linear(*byte as f32 / 255.0);
            assert!((sampled - fill[channel]).abs() < 1e-3, "channel {channel}: {sampled} vs {}", fill[channel]);
        }
        assert_eq!(texel[3], 255);
    }

    #[test]
    fn camera_transforms_entity_geometry_only() {
        let mut backend = GpuBackend::new();
        let mut q = RenderQueue::new();
        q.fill_rectangle(Rect::new(1.0, 1.0, 1.0, 1.0), Color::white(), Source::Entity, 0.0);
        q.fill_rectangle(Rect::new(1.0, 1.0, 1.0, 1.0), Color::white(), Source::Ui, 0.0);
        let camera = Camera2D { zoom: 10.0, ..Camera2D::default() };
        q.flush(&camera, &mut backend);

        assert_eq!(backend.mesh.vertices[0].pos, [10.0, 10.0]);
        assert_eq!(backend.mesh.vertices[4].pos, [1.0, 1.0]);
    }

    #[test]
    fn scissor_scope_sets_batch_clip() {
        let mut backend = GpuBackend::new();
        let mut q = RenderQueue::new();
        let clip = Rect::new(0.0, 0.0, 5.0, 5.0);
        q.scissor_mode(clip, Source::Ui, 0.0, |q| {
            q.fill_rectangle(Rect::new(0.0, 0.0, 9.0, 9.0), Color::white(), Source::Ui, 0.0);
        });
        q.fill_rectangle(Rect::new(0.0, 0.0, 9.0, 9.0), Color::white(), Source::Ui, 1.0);
        q.flush(&Camera2D::default(), &mut backend);

        let clips: Vec<_> = backend.mesh.batches.iter().map(|b| b.key.clip).collect();
        assert_eq!(clips, [Some(clip), None]);
    }

    #[test]
    fn bad_image_bytes_are_reported() {
        let mut backend = GpuBackend::new();
        let err = backend.load_texture_bytes("broken", b"nope").unwrap_err();
        assert!(matches!(err, AssetError::Decode { kind: "texture", .. }));
    }

    #[test]
    fn bad_font_bytes_are_reported() {
        let mut backend = GpuBackend::new();
        let err = backend.load_font("broken", b"nope").unwrap_err();
        assert!(matches!(err, AssetError::Decode { kind: "font", .. }));
        assert!(backend.font("broken").is_err());
    }
}
