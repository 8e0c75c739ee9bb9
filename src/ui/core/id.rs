use slotmap::new_key_type;

new_key_type! {
    /// Arena key of an element. Stale keys simply stop resolving.
    pub struct ElementId;

    /// Handle returned by `subscribe`/`subscribe_global`, used to unsubscribe.
    pub struct SubscriptionId;
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/core/id.rs"]
mod tests;
