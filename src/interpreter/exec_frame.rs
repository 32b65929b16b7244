use crate::sexp::Sexp;


/// One level of the execution trace: the application form being evaluated.
/// The root frame has no context.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExecFrame {
    context: Option<Sexp>,
}


impl ExecFrame {
    pub fn root() -> Self {
        Self { context: None }
    }

    pub fn new(context: Sexp) -> Self {
        Self {
            context: Some(context),
        }
    }

    pub fn context(&self) -> Option<&Sexp> {
        self.context.as_ref()
    }
}
