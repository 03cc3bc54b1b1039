use std::fmt;

macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
        pub struct $name(u64);

        impl $name {
            /// Human-readable resource kind, used in error messages.
            pub const KIND: &'static str = $kind;

            /// Wraps a raw id. Only meaningful to the `Graphics` implementation
            /// that issued it.
            #[inline]
            pub const fn from_raw(id: u64) -> Self {
                Self(id)
            }

            #[inline]
            pub const fn raw(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", $kind, self.0)
            }
        }
    };
}

define_handle!(
    /// Constant (uniform) buffer bound to one shader stage through a material.
    BufferHandle,
    "constant buffer"
);
define_handle!(
    /// Vertex stage: WGSL module + entry point.
    VertexShaderHandle,
    "vertex shader"
);
define_handle!(
    /// Pixel (fragment) stage: WGSL module + entry point.
    PixelShaderHandle,
    "pixel shader"
);
define_handle!(TextureHandle, "texture");
define_handle!(
    /// Shaders + constant buffer slots + textures + vertex input layout.
    MaterialHandle,
    "material"
);
define_handle!(MeshHandle, "mesh");
