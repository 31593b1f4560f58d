use specgen_printer::PrinterConfig;
use specgen_spec::Spec;

use crate::error::CommonResult;

/// Turns a spec into the source text of one target language
pub trait Generator {
    /// Name used to select the generator, e.g. `php`
    fn language(&self) -> &'static str;

    /// File extension including the leading dot
    fn extension(&self) -> &'static str;

    /// Name of the generated class, which also names the output file
    fn class_name<'s>(&self, spec: &'s Spec) -> CommonResult<&'s str>;

    fn generate(&self, spec: &Spec, config: &PrinterConfig) -> CommonResult<String>;

    fn file_name(&self, spec: &Spec) -> CommonResult<String> {
        Ok(format!("{}{}", self.class_name(spec)?, self.extension()))
    }
}
