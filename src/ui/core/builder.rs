use super::id::ElementId;
use super::runtime::Ui;
use super::tree::ElementOptions;
use super::widget::Element;
use crate::core::error::Result;

/// Handed to `Ui::build` callbacks: elements added through it attach to the
/// container being built unless their options name a parent explicitly.
pub struct Builder<'a> {
    ui: &'a mut Ui,
    container: ElementId,
}

impl<'a> Builder<'a> {
    pub(crate) fn new(ui: &'a mut Ui, container: ElementId) -> Self {
        Self { ui, container }
    }

    pub fn container(&self) -> ElementId {
        self.container
    }

    pub fn ui(&mut self) -> &mut Ui {
        &mut *self.ui
    }

    pub fn add<E: Element>(&mut self, element: E, mut options: ElementOptions) -> Result<ElementId> {
        options.parent.get_or_insert(self.container);
        self.ui.add(element, options)
    }

    /// Add a container and fill it through a nested builder.
    pub fn add_with<E: Element>(
        &mut self,
        element: E,
        options: ElementOptions,
        f: impl FnOnce(&mut Builder<'_>) -> Result<()>,
    ) -> Result<ElementId> {
        let id = self.add(element, options)?;
        self.ui.build(id, f)?;
        Ok(id)
    }
}
