use super::*;
use crate::{error::ErrorCode, sequence::ItemSequence};

struct Constant {
    signature: Signature,
}

impl Function for Constant {
    fn name(&self) -> QName {
        QName::new("local", "answer")
    }

    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn execute(
        &self,
        _ctx: &QueryContext,
        _args: &[Option<&dyn Sequence>],
    ) -> Result<Option<Atomic>, QueryError> {
        Ok(Some(Atomic::int(42)))
    }
}

#[test]
fn qname_displays_prefixed() {
    assert_eq!(QName::builtin("sum").to_string(), "fn:sum");
    assert_eq!(QName::builtin("avg").prefix(), QName::FN_PREFIX);
}

#[test]
fn builtin_library_registers_sum_and_avg() {
    let library = FunctionLibrary::builtin();
    assert_eq!(library.len(), 3);

    for (local, arity) in [("sum", 1), ("sum", 2), ("avg", 1)] {
        let function = library
            .lookup(QName::builtin(local), arity)
            .unwrap_or_else(|| panic!("fn:{local}#{arity} missing"));
        assert_eq!(function.signature().arity(), arity);
        assert_eq!(function.name().local(), local);
    }

    assert!(library.lookup(QName::builtin("avg"), 2).is_none());
}

#[test]
fn signatures_declare_result_cardinality() {
    assert_eq!(SumAvg::sum().signature().result().occurrence, Occurrence::One);
    assert_eq!(
        SumAvg::sum_with_default().signature().result().occurrence,
        Occurrence::ZeroOrOne
    );
    assert_eq!(SumAvg::avg().signature().result().occurrence, Occurrence::ZeroOrOne);
    assert!(
        SumAvg::avg()
            .signature()
            .params()
            .iter()
            .all(|param| param.occurrence == Occurrence::ZeroOrMany)
    );
}

#[test]
fn call_routes_by_arity() {
    let library = FunctionLibrary::builtin();
    let ctx = QueryContext::default();
    let empty = ItemSequence::empty();

    let sum = library.call(&ctx, QName::builtin("sum"), &[Some(&empty)]);
    assert_eq!(sum, Ok(Some(Atomic::int(0))));

    let sum = library.call(&ctx, QName::builtin("sum"), &[Some(&empty), None]);
    assert_eq!(sum, Ok(None));

    let avg = library.call(&ctx, QName::builtin("avg"), &[Some(&empty)]);
    assert_eq!(avg, Ok(None));
}

#[test]
fn unknown_function_is_reported() {
    let library = FunctionLibrary::builtin();
    let err = library
        .call(&QueryContext::default(), QName::builtin("max"), &[None])
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::UnknownFunction);
    assert_eq!(err.message, "Unknown function: fn:max#1");
    assert_eq!(
        err.display_with_origin(),
        "function:XPST0017: Unknown function: fn:max#1"
    );
}

#[test]
fn register_adds_and_replaces() {
    let mut library = FunctionLibrary::new();
    assert!(library.is_empty());

    let signature = Signature::new(SequenceType::new(Type::Int, Occurrence::One), Vec::new());
    library.register(Constant {
        signature: signature.clone(),
    });
    library.register(Constant { signature });
    assert_eq!(library.len(), 1);

    let answer = library.call(&QueryContext::default(), QName::new("local", "answer"), &[]);
    assert_eq!(answer, Ok(Some(Atomic::int(42))));
}
