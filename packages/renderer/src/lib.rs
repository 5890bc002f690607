pub mod css;
pub mod gesture;
pub mod render;
pub mod theme;
pub mod vdom;

pub use css::{radius_value, resolve_styles, StyleDeclaration};
pub use gesture::{dispatch, Gesture, GestureSink, Navigator, NoNavigation, NoSelection};
pub use render::{
    render_block, render_blocks, render_page, RenderMode, RenderOptions, EMPTY_COLUMN_HINT,
    EMPTY_PAGE_HINT, EMPTY_SECTION_HINT, LEGACY_MARKER,
};
pub use theme::{adjust_color, theme_variables};
pub use vdom::{VNode, VirtualPage};
