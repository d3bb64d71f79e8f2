use std::path::Path;

use anyhow::{Context, Result};

use crate::render::RenderCtx;

/// Decoded RGBA8 pixels, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TexturePixels {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TexturePixels {
    /// Opaque white 1×1 image bound when no texture is loaded.
    pub fn white() -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: vec![0xff; 4],
        }
    }

    /// Whether both sides fit a device's `max_texture_dimension_2d`.
    pub fn fits(&self, max_dimension: u32) -> bool {
        self.width <= max_dimension && self.height <= max_dimension
    }

    /// Decodes any format `image` was built with and converts it to RGBA8.
    pub fn decode(path: &Path) -> Result<Self> {
        let img = image::open(path)
            .with_context(|| format!("failed to decode image {}", path.display()))?
            .to_rgba8();
        let (width, height) = img.dimensions();
        anyhow::ensure!(width > 0 && height > 0, "image {} is empty", path.display());
        Ok(Self {
            width,
            height,
            rgba: img.into_raw(),
        })
    }
}

/// Sampled texture applied to the filled grid.
///
/// Wraps with mirrored repeat and filters linearly; no mipmaps.
pub struct GridTexture {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
    sampler: wgpu::Sampler,
    loaded: bool,
}

impl GridTexture {
    /// Loads `path` or falls back to the white texture.
    ///
    /// A missing or undecodable file is not fatal: it is logged and the grid
    /// keeps its vertex colors.
    pub fn load_or_fallback(ctx: &RenderCtx<'_>, path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::upload(ctx, &TexturePixels::white(), false);
        };

        let max_dimension = ctx.device.limits().max_texture_dimension_2d;
        match TexturePixels::decode(path) {
            Ok(pixels) if !pixels.fits(max_dimension) => {
                log::warn!(
                    "texture {} is {}x{}, device allows at most {max_dimension}x{max_dimension}",
                    path.display(),
                    pixels.width,
                    pixels.height
                );
                Self::upload(ctx, &TexturePixels::white(), false)
            }
            Ok(pixels) => {
                log::info!(
                    "loaded texture {} ({}x{})",
                    path.display(),
                    pixels.width,
                    pixels.height
                );
                Self::upload(ctx, &pixels, true)
            }
            Err(err) => {
                log::warn!("failed to load texture: {err:#}");
                Self::upload(ctx, &TexturePixels::white(), false)
            }
        }
    }

    fn upload(ctx: &RenderCtx<'_>, pixels: &TexturePixels, loaded: bool) -> Self {
        let size = wgpu::Extent3d {
            width: pixels.width,
            height: pixels.height,
            depth_or_array_layers: 1,
        };

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("gridmesh grid texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &pixels.rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * pixels.width),
                rows_per_image: Some(pixels.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("gridmesh grid sampler"),
            address_mode_u: wgpu::AddressMode::MirrorRepeat,
            address_mode_v: wgpu::AddressMode::MirrorRepeat,
            address_mode_w: wgpu::AddressMode::MirrorRepeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        Self {
            _texture: texture,
            view,
            sampler,
            loaded,
        }
    }

    /// Whether a real image is bound (as opposed to the white fallback).
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }
}
