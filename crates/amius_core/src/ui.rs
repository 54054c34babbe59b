//! Screen-space UI elements
//!
//! UI elements live in a scene's fixed slot table rather than the object tree.
//! A [`UiHandle`] names an element without owning it and reports whether the
//! element still exists.

use std::fmt;
use std::rc::{Rc, Weak};

use amius_input::InputState;
use amius_math::{Vec2, Vec3};
use serde::{Serialize, Deserialize};

use crate::context::SceneCtx;

/// Per-tick behavior of a UI element
pub type UiTick = Box<dyn FnMut(&mut UiElement, &SceneCtx, &InputState)>;

/// Horizontal text alignment, encoded as the renderer's flag values
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum TextAlign {
    #[default]
    Left = 0,
    Right = 4,
    Center = 8,
}

/// What the renderer should draw for a UI element
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum UiRenderData {
    Text {
        text: String,
        /// Text box size; a zero height means a single line
        dimension: Vec2,
        /// RGBA, 0xRRGGBBAA
        base_color: u32,
        align: TextAlign,
    },
}

impl Default for UiRenderData {
    fn default() -> Self {
        UiRenderData::text("Sample Text", Vec2::new(1.0, 0.0), 0xFFFF_FFFF, TextAlign::Left)
    }
}

impl UiRenderData {
    pub fn text(text: impl Into<String>, dimension: Vec2, base_color: u32, align: TextAlign) -> Self {
        UiRenderData::Text {
            text: text.into(),
            dimension,
            base_color,
            align,
        }
    }
}

/// A UI element
pub struct UiElement {
    pub data: UiRenderData,
    pub position: Vec3,
    /// Rotation in radians around the screen normal
    pub rotation: f32,
    pub scale: Vec2,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
    pub(crate) tick: Option<UiTick>,
    pub(crate) tick_replaced: bool,
    token: Rc<()>,
}

impl Default for UiElement {
    fn default() -> Self {
        Self::new(UiRenderData::default())
    }
}

impl fmt::Debug for UiElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiElement")
            .field("data", &self.data)
            .field("position", &self.position)
            .field("rotation", &self.rotation)
            .field("scale", &self.scale)
            .field("flip_horizontal", &self.flip_horizontal)
            .field("flip_vertical", &self.flip_vertical)
            .field("has_tick", &self.tick.is_some())
            .finish()
    }
}

impl UiElement {
    pub fn new(data: UiRenderData) -> Self {
        Self {
            data,
            position: Vec3::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
            flip_horizontal: false,
            flip_vertical: false,
            tick: None,
            tick_replaced: false,
            token: Rc::new(()),
        }
    }

    /// A text element
    pub fn text(text: impl Into<String>, width: f32, base_color: u32, align: TextAlign) -> Self {
        Self::new(UiRenderData::text(text, Vec2::new(width, 0.0), base_color, align))
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_flip(mut self, horizontal: bool, vertical: bool) -> Self {
        self.flip_horizontal = horizontal;
        self.flip_vertical = vertical;
        self
    }

    /// Attach a per-tick behavior
    pub fn with_tick<F>(mut self, tick: F) -> Self
    where
        F: FnMut(&mut UiElement, &SceneCtx, &InputState) + 'static,
    {
        self.tick = Some(Box::new(tick));
        self
    }

    /// Replace the per-tick behavior; `None` stops ticking
    pub fn set_tick(&mut self, tick: Option<UiTick>) {
        self.tick = tick;
        self.tick_replaced = true;
    }

    pub fn has_tick(&self) -> bool {
        self.tick.is_some()
    }

    /// Text content, for text elements
    pub fn text_mut(&mut self) -> Option<&mut String> {
        match &mut self.data {
            UiRenderData::Text { text, .. } => Some(text),
        }
    }

    /// Base color, for text elements
    pub fn set_color(&mut self, color: u32) {
        match &mut self.data {
            UiRenderData::Text { base_color, .. } => *base_color = color,
        }
    }

    pub(crate) fn handle(&self, slot: usize) -> UiHandle {
        UiHandle {
            slot,
            token: Rc::downgrade(&self.token),
        }
    }

    pub(crate) fn is_named_by(&self, handle: &UiHandle) -> bool {
        handle.token.upgrade().is_some_and(|token| Rc::ptr_eq(&token, &self.token))
    }
}

/// Non-owning reference to a UI element in a scene slot
#[derive(Clone, Debug)]
pub struct UiHandle {
    slot: usize,
    token: Weak<()>,
}

impl UiHandle {
    /// Slot the element was placed in
    #[inline]
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Whether the element still exists
    pub fn is_valid(&self) -> bool {
        self.token.strong_count() > 0
    }
}
