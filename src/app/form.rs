//! The add-song form state.

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Title,
    Source,
}

/// Two text fields plus which one has focus. Hidden unless `open`.
#[derive(Debug, Clone, Default)]
pub struct AddForm {
    pub open: bool,
    pub title: String,
    pub source: String,
    pub focus: FormField,
}

impl AddForm {
    pub fn open(&mut self) {
        self.open = true;
        self.focus = FormField::Title;
    }

    /// Close the form, discarding whatever was typed.
    pub fn cancel(&mut self) {
        self.open = false;
        self.title.clear();
        self.source.clear();
        self.focus = FormField::Title;
    }

    pub fn switch_focus(&mut self) {
        self.focus = match self.focus {
            FormField::Title => FormField::Source,
            FormField::Source => FormField::Title,
        };
    }

    pub fn push_char(&mut self, c: char) {
        self.focused_mut().push(c);
    }

    pub fn pop_char(&mut self) {
        self.focused_mut().pop();
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Title => &mut self.title,
            FormField::Source => &mut self.source,
        }
    }
}
