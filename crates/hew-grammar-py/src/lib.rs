//! Python bindings for `hew-grammar`.

use ::hew_grammar::{
    hew, is_valid, load_language, GrammarDescriptor, LanguageHandle, LoadOptions,
};
use pyo3::create_exception;
use pyo3::exceptions::PyException;
use pyo3::prelude::*;

create_exception!(_hew_grammar, GrammarLoadError, PyException);

fn to_py_err(err: ::hew_grammar::GrammarLoadError) -> PyErr {
    GrammarLoadError::new_err(err.to_string())
}

/// A validated grammar handle.
#[pyclass(name = "Language", frozen, module = "_hew_grammar")]
struct Language {
    inner: LanguageHandle,
}

#[pymethods]
impl Language {
    #[getter]
    fn name(&self) -> &str {
        self.inner.name()
    }

    #[getter]
    fn start_rule(&self) -> &str {
        self.inner.start_rule()
    }

    #[getter]
    fn rule_count(&self) -> usize {
        self.inner.rule_count()
    }

    #[getter]
    fn warnings(&self) -> Vec<String> {
        self.inner.warnings().to_vec()
    }

    fn rule_names(&self) -> Vec<String> {
        self.inner
            .grammar()
            .rule_names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    fn is_valid(&self) -> bool {
        is_valid(&self.inner)
    }

    fn __repr__(&self) -> String {
        format!(
            "Language(name={:?}, rules={}, start_rule={:?})",
            self.inner.name(),
            self.inner.rule_count(),
            self.inner.start_rule()
        )
    }
}

/// Load the embedded Hew grammar.
#[pyfunction]
fn language() -> PyResult<Language> {
    hew::language()
        .map(|inner| Language { inner })
        .map_err(to_py_err)
}

/// Load a `grammar.json` descriptor from disk.
#[pyfunction(name = "load_language")]
#[pyo3(signature = (path, name = None, strict = false))]
fn py_load_language(path: &str, name: Option<String>, strict: bool) -> PyResult<Language> {
    let mut descriptor = GrammarDescriptor::from_path(path);
    if let Some(name) = name {
        descriptor = descriptor.named(name);
    }

    load_language(&descriptor, &LoadOptions::new().strict(strict))
        .map(|inner| Language { inner })
        .map_err(to_py_err)
}

#[pymodule]
fn _hew_grammar(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Language>()?;
    m.add_function(wrap_pyfunction!(language, m)?)?;
    m.add_function(wrap_pyfunction!(py_load_language, m)?)?;
    m.add("GrammarLoadError", m.py().get_type::<GrammarLoadError>())?;
    Ok(())
}
