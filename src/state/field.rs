use std::{
    cell::{Cell, Ref, RefCell},
    fmt,
    rc::Rc,
};

struct FieldCell<T> {
    name: &'static str,
    value: RefCell<T>,
    writes: Cell<u64>,
}

/// Read side of one piece of UI state. Cheap to clone; every clone sees the same value.
pub struct StateField<T> {
    cell: Rc<FieldCell<T>>,
}

/// The single write side of a [`StateField`]. Not `Clone`: one writer per field.
pub struct FieldWriter<T> {
    cell: Rc<FieldCell<T>>,
}

/// Create a field and its one writer.
pub fn field<T>(name: &'static str, initial: T) -> (FieldWriter<T>, StateField<T>) {
    let cell = Rc::new(FieldCell {
        name,
        value: RefCell::new(initial),
        writes: Cell::new(0),
    });
    (
        FieldWriter { cell: cell.clone() },
        StateField { cell },
    )
}

impl<T> StateField<T> {
    /// Field name, for logs.
    pub fn name(&self) -> &'static str {
        self.cell.name
    }

    /// Borrow the current value.
    pub fn borrow(&self) -> Ref<'_, T> {
        self.cell.value.borrow()
    }

    /// How many times the writer's setter has been called.
    pub fn writes(&self) -> u64 {
        self.cell.writes.get()
    }
}

impl<T: Clone> StateField<T> {
    /// Copy of the current value.
    pub fn get(&self) -> T {
        self.cell.value.borrow().clone()
    }
}

impl<T> Clone for StateField<T> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for StateField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateField")
            .field("name", &self.cell.name)
            .field("value", &*self.cell.value.borrow())
            .field("writes", &self.cell.writes.get())
            .finish()
    }
}

impl<T> FieldWriter<T> {
    /// Replace the value. Every call counts as a write, even if the value is unchanged.
    pub fn set(&self, value: T) {
        *self.cell.value.borrow_mut() = value;
        self.cell.writes.set(self.cell.writes.get() + 1);
    }

    /// Update in place through a closure; counts as one write.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut *self.cell.value.borrow_mut());
        self.cell.writes.set(self.cell.writes.get() + 1);
    }

    /// A reader for the field this writer owns.
    pub fn reader(&self) -> StateField<T> {
        StateField {
            cell: self.cell.clone(),
        }
    }
}

impl<T: Clone> FieldWriter<T> {
    /// Current value as seen by the writer.
    pub fn get(&self) -> T {
        self.cell.value.borrow().clone()
    }
}

impl<T> fmt::Debug for FieldWriter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldWriter")
            .field("name", &self.cell.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/state/field.rs"]
mod tests;
