use crate::renderer::{ItemShader, ItemUniforms, RenderState};
use crate::widgets::Color;

/// Rounded fill darkened toward `dim` by `shade`, faded by the transition.
pub const OVERLAY_FRAGMENT_SHADER: &str = r#"
@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let dist = rounded_box_sdf(in.local, item.size * 0.5, item.radius);
    let dimmed = mix(item.fill.rgb, item.dim.rgb, clamp(item.shade * item.dim.a, 0.0, 1.0));
    let alpha = item.fill.a * edge_coverage(dist) * item.opacity;
    return vec4<f32>(dimmed, alpha);
}
"#;

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayShader {
    pub fill: Color,
    pub dim: Color,
    pub radius: f32,
    pub shade: f32,
}

impl ItemShader for OverlayShader {
    fn label(&self) -> &str {
        "Overlay"
    }

    fn fragment_shader(&self) -> &str {
        OVERLAY_FRAGMENT_SHADER
    }

    fn bind(&self, uniforms: &mut ItemUniforms, _state: &RenderState) {
        uniforms.fill = self.fill.to_array();
        uniforms.dim = self.dim.to_array();
        uniforms.shade = self.shade;
    }

    fn corner_radius(&self) -> f32 {
        self.radius
    }
}
