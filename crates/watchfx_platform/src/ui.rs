//! Host UI widgets
//!
//! Pages talk to the screen through [`HostUi`]: create a widget, then push
//! property updates at it, typically from an animation frame callback.

use std::cell::{Cell, RefCell};

use slotmap::{new_key_type, SlotMap};
use watchfx_animation::Border;

use crate::error::{PlatformError, Result};

new_key_type! {
    /// Identifier of an on-screen widget
    pub struct WidgetId;
}

/// Widget description and state
#[derive(Clone, Debug, PartialEq)]
pub enum Widget {
    /// Solid rounded rectangle
    FillRect { border: Border, color: u32 },
    /// Single line of text inside a box
    Text {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: u32,
        text: String,
    },
}

impl Widget {
    pub fn kind(&self) -> &'static str {
        match self {
            Widget::FillRect { .. } => "FILL_RECT",
            Widget::Text { .. } => "TEXT",
        }
    }

    fn apply(&mut self, prop: &Prop) -> Result<()> {
        let kind = self.kind();
        match (self, prop) {
            (Widget::FillRect { border, .. }, Prop::X(v)) => border.x = *v,
            (Widget::FillRect { border, .. }, Prop::Y(v)) => border.y = *v,
            (Widget::FillRect { border, .. }, Prop::W(v)) => border.w = *v,
            (Widget::FillRect { border, .. }, Prop::H(v)) => border.h = *v,
            (Widget::FillRect { border, .. }, Prop::Radius(v)) => border.radius = *v,
            (Widget::FillRect { border, .. }, Prop::More(more)) => *border = *more,
            (Widget::FillRect { color, .. }, Prop::Color(c)) => *color = *c,
            (Widget::Text { x, .. }, Prop::X(v)) => *x = *v,
            (Widget::Text { y, .. }, Prop::Y(v)) => *y = *v,
            (Widget::Text { w, .. }, Prop::W(v)) => *w = *v,
            (Widget::Text { h, .. }, Prop::H(v)) => *h = *v,
            (Widget::Text { color, .. }, Prop::Color(c)) => *color = *c,
            (Widget::Text { text, .. }, Prop::Text(t)) => text.clone_from(t),
            (_, prop) => {
                return Err(PlatformError::UnsupportedProperty {
                    kind,
                    prop: prop.name(),
                })
            }
        }
        Ok(())
    }
}

/// Widget property update
#[derive(Clone, Debug, PartialEq)]
pub enum Prop {
    X(f64),
    Y(f64),
    W(f64),
    H(f64),
    Radius(f64),
    /// Packed `0xRRGGBB`
    Color(u32),
    Text(String),
    /// Geometry and radius in one update
    More(Border),
}

impl Prop {
    pub fn name(&self) -> &'static str {
        match self {
            Prop::X(_) => "X",
            Prop::Y(_) => "Y",
            Prop::W(_) => "W",
            Prop::H(_) => "H",
            Prop::Radius(_) => "RADIUS",
            Prop::Color(_) => "COLOR",
            Prop::Text(_) => "TEXT",
            Prop::More(_) => "MORE",
        }
    }
}

/// Widget capability of the host
pub trait HostUi {
    fn create_widget(&self, widget: Widget) -> WidgetId;

    fn set_property(&self, id: WidgetId, prop: Prop) -> Result<()>;

    fn delete_widget(&self, id: WidgetId) -> Result<()>;

    /// Snapshot of a widget's current state
    fn widget(&self, id: WidgetId) -> Option<Widget>;
}

/// In-memory host that logs every mutation
#[derive(Debug, Default)]
pub struct HeadlessUi {
    widgets: RefCell<SlotMap<WidgetId, Widget>>,
    mutations: Cell<u64>,
}

impl HeadlessUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Property updates applied so far
    pub fn mutation_count(&self) -> u64 {
        self.mutations.get()
    }

    pub fn widget_count(&self) -> usize {
        self.widgets.borrow().len()
    }
}

impl HostUi for HeadlessUi {
    fn create_widget(&self, widget: Widget) -> WidgetId {
        let kind = widget.kind();
        let id = self.widgets.borrow_mut().insert(widget);
        tracing::debug!("Created {} widget {:?}", kind, id);
        id
    }

    fn set_property(&self, id: WidgetId, prop: Prop) -> Result<()> {
        let mut widgets = self.widgets.borrow_mut();
        let widget = widgets
            .get_mut(id)
            .ok_or(PlatformError::WidgetNotFound(id))?;
        widget.apply(&prop)?;
        self.mutations.set(self.mutations.get() + 1);
        tracing::trace!("Widget {:?} <- {:?}", id, prop);
        Ok(())
    }

    fn delete_widget(&self, id: WidgetId) -> Result<()> {
        let widget = self
            .widgets
            .borrow_mut()
            .remove(id)
            .ok_or(PlatformError::WidgetNotFound(id))?;
        tracing::debug!("Deleted {} widget {:?}", widget.kind(), id);
        Ok(())
    }

    fn widget(&self, id: WidgetId) -> Option<Widget> {
        self.widgets.borrow().get(id).cloned()
    }
}
