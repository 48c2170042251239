//! Vulkan enum and flag values carried by descriptors.
//!
//! Each type is a transparent `u32` newtype with named constants for the
//! core values. Unknown values (from extensions or newer headers) are kept
//! verbatim; the exporter never rejects an enum it does not recognize.

use std::fmt;

use serde::Serialize;

macro_rules! vk_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident = $value:expr),* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            $(pub const $variant: Self = Self($value);)*

            pub const fn as_raw(self) -> u32 {
                self.0
            }

            /// Name of the constant with this value, if there is one.
            pub fn known_name(self) -> Option<&'static str> {
                $(if self.0 == $value {
                    return Some(stringify!($variant));
                })*
                None
            }
        }

        impl From<u32> for $name {
            fn from(raw: u32) -> Self {
                Self(raw)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self.known_name() {
                    Some(name) => write!(f, "{}::{}", stringify!($name), name),
                    None => write!(f, "{}({})", stringify!($name), self.0),
                }
            }
        }
    };
}

vk_enum!(
    /// `VkStructureType`, restricted to the create-info structs decoded here.
    StructureType {
        SHADER_MODULE_CREATE_INFO = 16,
        PIPELINE_SHADER_STAGE_CREATE_INFO = 18,
        PIPELINE_VERTEX_INPUT_STATE_CREATE_INFO = 19,
        PIPELINE_INPUT_ASSEMBLY_STATE_CREATE_INFO = 20,
        PIPELINE_TESSELLATION_STATE_CREATE_INFO = 21,
        PIPELINE_VIEWPORT_STATE_CREATE_INFO = 22,
        PIPELINE_RASTERIZATION_STATE_CREATE_INFO = 23,
        PIPELINE_MULTISAMPLE_STATE_CREATE_INFO = 24,
        PIPELINE_DEPTH_STENCIL_STATE_CREATE_INFO = 25,
        PIPELINE_COLOR_BLEND_STATE_CREATE_INFO = 26,
        PIPELINE_DYNAMIC_STATE_CREATE_INFO = 27,
        GRAPHICS_PIPELINE_CREATE_INFO = 28,
        COMPUTE_PIPELINE_CREATE_INFO = 29,
        PIPELINE_LAYOUT_CREATE_INFO = 30,
        SAMPLER_CREATE_INFO = 31,
        DESCRIPTOR_SET_LAYOUT_CREATE_INFO = 32,
        RENDER_PASS_CREATE_INFO = 38,
    }
);

vk_enum!(Filter { NEAREST = 0, LINEAR = 1 });

vk_enum!(SamplerMipmapMode { NEAREST = 0, LINEAR = 1 });

vk_enum!(SamplerAddressMode {
    REPEAT = 0,
    MIRRORED_REPEAT = 1,
    CLAMP_TO_EDGE = 2,
    CLAMP_TO_BORDER = 3,
    MIRROR_CLAMP_TO_EDGE = 4,
});

vk_enum!(CompareOp {
    NEVER = 0,
    LESS = 1,
    EQUAL = 2,
    LESS_OR_EQUAL = 3,
    GREATER = 4,
    NOT_EQUAL = 5,
    GREATER_OR_EQUAL = 6,
    ALWAYS = 7,
});

vk_enum!(BorderColor {
    FLOAT_TRANSPARENT_BLACK = 0,
    INT_TRANSPARENT_BLACK = 1,
    FLOAT_OPAQUE_BLACK = 2,
    INT_OPAQUE_BLACK = 3,
    FLOAT_OPAQUE_WHITE = 4,
    INT_OPAQUE_WHITE = 5,
});

vk_enum!(DescriptorType {
    SAMPLER = 0,
    COMBINED_IMAGE_SAMPLER = 1,
    SAMPLED_IMAGE = 2,
    STORAGE_IMAGE = 3,
    UNIFORM_TEXEL_BUFFER = 4,
    STORAGE_TEXEL_BUFFER = 5,
    UNIFORM_BUFFER = 6,
    STORAGE_BUFFER = 7,
    UNIFORM_BUFFER_DYNAMIC = 8,
    STORAGE_BUFFER_DYNAMIC = 9,
    INPUT_ATTACHMENT = 10,
});

vk_enum!(
    /// `VkShaderStageFlags` (and single-bit `VkShaderStageFlagBits`).
    ShaderStageFlags {
        VERTEX = 0x1,
        TESSELLATION_CONTROL = 0x2,
        TESSELLATION_EVALUATION = 0x4,
        GEOMETRY = 0x8,
        FRAGMENT = 0x10,
        COMPUTE = 0x20,
        ALL_GRAPHICS = 0x1f,
        ALL = 0x7fff_ffff,
    }
);

vk_enum!(Format {
    UNDEFINED = 0,
    R8G8B8A8_UNORM = 37,
    R8G8B8A8_SRGB = 43,
    B8G8R8A8_UNORM = 44,
    B8G8R8A8_SRGB = 50,
    R32G32_SFLOAT = 103,
    R32G32B32_SFLOAT = 106,
    R32G32B32A32_SFLOAT = 109,
    D16_UNORM = 124,
    D32_SFLOAT = 126,
    D24_UNORM_S8_UINT = 129,
    D32_SFLOAT_S8_UINT = 130,
});

vk_enum!(SampleCountFlags {
    TYPE_1 = 0x1,
    TYPE_2 = 0x2,
    TYPE_4 = 0x4,
    TYPE_8 = 0x8,
    TYPE_16 = 0x10,
    TYPE_32 = 0x20,
    TYPE_64 = 0x40,
});

vk_enum!(AttachmentLoadOp { LOAD = 0, CLEAR = 1, DONT_CARE = 2 });

vk_enum!(AttachmentStoreOp { STORE = 0, DONT_CARE = 1 });

vk_enum!(ImageLayout {
    UNDEFINED = 0,
    GENERAL = 1,
    COLOR_ATTACHMENT_OPTIMAL = 2,
    DEPTH_STENCIL_ATTACHMENT_OPTIMAL = 3,
    DEPTH_STENCIL_READ_ONLY_OPTIMAL = 4,
    SHADER_READ_ONLY_OPTIMAL = 5,
    TRANSFER_SRC_OPTIMAL = 6,
    TRANSFER_DST_OPTIMAL = 7,
    PREINITIALIZED = 8,
    PRESENT_SRC_KHR = 1_000_001_002,
});

vk_enum!(PipelineBindPoint { GRAPHICS = 0, COMPUTE = 1 });

vk_enum!(VertexInputRate { VERTEX = 0, INSTANCE = 1 });

vk_enum!(PrimitiveTopology {
    POINT_LIST = 0,
    LINE_LIST = 1,
    LINE_STRIP = 2,
    TRIANGLE_LIST = 3,
    TRIANGLE_STRIP = 4,
    TRIANGLE_FAN = 5,
    LINE_LIST_WITH_ADJACENCY = 6,
    LINE_STRIP_WITH_ADJACENCY = 7,
    TRIANGLE_LIST_WITH_ADJACENCY = 8,
    TRIANGLE_STRIP_WITH_ADJACENCY = 9,
    PATCH_LIST = 10,
});

vk_enum!(PolygonMode { FILL = 0, LINE = 1, POINT = 2 });

vk_enum!(CullModeFlags { NONE = 0, FRONT = 0x1, BACK = 0x2, FRONT_AND_BACK = 0x3 });

vk_enum!(FrontFace { COUNTER_CLOCKWISE = 0, CLOCKWISE = 1 });

vk_enum!(StencilOp {
    KEEP = 0,
    ZERO = 1,
    REPLACE = 2,
    INCREMENT_AND_CLAMP = 3,
    DECREMENT_AND_CLAMP = 4,
    INVERT = 5,
    INCREMENT_AND_WRAP = 6,
    DECREMENT_AND_WRAP = 7,
});

vk_enum!(LogicOp {
    CLEAR = 0,
    AND = 1,
    COPY = 3,
    NO_OP = 5,
    XOR = 6,
    OR = 7,
    SET = 15,
});

vk_enum!(BlendFactor {
    ZERO = 0,
    ONE = 1,
    SRC_COLOR = 2,
    ONE_MINUS_SRC_COLOR = 3,
    DST_COLOR = 4,
    ONE_MINUS_DST_COLOR = 5,
    SRC_ALPHA = 6,
    ONE_MINUS_SRC_ALPHA = 7,
    DST_ALPHA = 8,
    ONE_MINUS_DST_ALPHA = 9,
});

vk_enum!(BlendOp { ADD = 0, SUBTRACT = 1, REVERSE_SUBTRACT = 2, MIN = 3, MAX = 4 });

vk_enum!(ColorComponentFlags { R = 0x1, G = 0x2, B = 0x4, A = 0x8, RGBA = 0xf });

vk_enum!(DynamicState {
    VIEWPORT = 0,
    SCISSOR = 1,
    LINE_WIDTH = 2,
    DEPTH_BIAS = 3,
    BLEND_CONSTANTS = 4,
    DEPTH_BOUNDS = 5,
    STENCIL_COMPARE_MASK = 6,
    STENCIL_WRITE_MASK = 7,
    STENCIL_REFERENCE = 8,
});
