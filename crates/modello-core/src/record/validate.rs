use crate::{
    field::FieldKind,
    path::Path,
    record::{CheckContext, RecordDef, RecordInstance},
    report::Report,
    value::Value,
};
use std::sync::Arc;

impl RecordInstance {
    /// Validate this instance against its definition, collecting every
    /// violation across the whole tree. Never short-circuits and never
    /// errors: the caller decides what an empty or non-empty report
    /// means.
    ///
    /// Takes `&mut self` for the two documented side effects: prepare
    /// hooks writing derived values, and decimal canonicalization.
    pub fn validate(&mut self) -> Report {
        let def = self.def.clone();
        let mut report = Report::new();
        let mut path = Path::root();
        def.validate_into(self, &mut path, &mut report);

        report
    }
}

impl RecordDef {
    pub(crate) fn validate_into(
        &self,
        instance: &mut RecordInstance,
        path: &mut Path,
        report: &mut Report,
    ) {
        if let Some(prepare) = &self.prepare {
            prepare(instance);
        }

        for (idx, field) in self.fields.iter().enumerate() {
            match (&field.kind, &mut instance.values[idx]) {
                (FieldKind::Record(def), Value::Record(inner)) => {
                    path.push(field.name);
                    if Arc::ptr_eq(def, &inner.def) {
                        def.validate_into(inner, path, report);
                    } else {
                        report.fail(
                            path.clone(),
                            format!(
                                "nested record is of type '{}', expected '{}'",
                                inner.def.name, def.name
                            ),
                        );
                    }
                    path.pop();
                }

                (FieldKind::RecordList(def), Value::List(items)) => {
                    path.push(field.name);
                    for (i, item) in items.iter_mut().enumerate() {
                        path.push(i);
                        if Arc::ptr_eq(def, &item.def) {
                            def.validate_into(item, path, report);
                        } else {
                            report.fail(
                                path.clone(),
                                format!(
                                    "nested record is of type '{}', expected '{}'",
                                    item.def.name, def.name
                                ),
                            );
                        }
                        path.pop();
                    }
                    path.pop();
                }

                (_, value) => {
                    for message in field.validate_value(value) {
                        report.fail(path.child(field.name), message);
                    }
                }
            }
        }

        // whole-record rules run after this record's own field checks
        if let Some(check) = &self.check {
            let mut ctx = CheckContext {
                path: &*path,
                report: &mut *report,
            };
            check(instance, &mut ctx);
        }
    }
}

///
/// TESTS
///
