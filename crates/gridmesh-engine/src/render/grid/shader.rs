use anyhow::{Context, Result, anyhow};

use crate::render::RenderCtx;

pub(super) const GRID_WGSL: &str = include_str!("shaders/grid.wgsl");
pub(super) const LINE_WGSL: &str = include_str!("shaders/line.wgsl");

/// Parses and validates WGSL with naga.
///
/// wgpu reports shader errors asynchronously through the device error
/// callback; checking up front turns a broken shader into a startup error.
pub(super) fn validate_wgsl(label: &str, source: &str) -> Result<()> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| anyhow!("{label}: WGSL parse error:\n{}", e.emit_to_string(source)))?;

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator
        .validate(&module)
        .map_err(|e| anyhow!("{label}: validation error: {e}"))?;

    Ok(())
}

/// Validates `source` and creates the wgpu shader module.
pub(super) fn create_shader(
    ctx: &RenderCtx<'_>,
    label: &str,
    source: &str,
) -> Result<wgpu::ShaderModule> {
    validate_wgsl(label, source).with_context(|| format!("failed to compile shader {label}"))?;

    log::debug!("compiled shader {label}");

    Ok(ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_shaders_validate() {
        validate_wgsl("grid.wgsl", GRID_WGSL).unwrap();
        validate_wgsl("line.wgsl", LINE_WGSL).unwrap();
    }

    #[test]
    fn syntax_error_is_reported() {
        let err = validate_wgsl("broken", "fn vs_main( -> {").unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("broken: WGSL parse error"), "{msg}");
    }

    #[test]
    fn type_error_is_reported() {
        let src = r#"
            @fragment
            fn fs_main() -> @location(0) vec4<f32> {
                let x: f32 = vec2<f32>(1.0, 2.0);
                return vec4<f32>(x);
            }
        "#;
        assert!(validate_wgsl("typed", src).is_err());
    }
}
