use super::*;
use vane_common::Backend;
use vane_infer::{InfectiousMetadata, MarkedTypeDecl};
use vane_ir::{CoreExpr, CoreExprNode, CoreModule, CoreModuleGraph, CoreValueBinding};
use vane_types::{ConstructorInfo, Type, TypeInfo, TypeScheme};

fn list_decl() -> MarkedTypeDecl {
    let elem = Type::Variable(0);
    let list_ty = Type::constructor("List", vec![elem.clone()]);
    MarkedTypeDecl {
        name: "List".into(),
        info: TypeInfo {
            parameters: vec![0],
            constructors: vec![
                ConstructorInfo { name: "Nil".into(), arity: 0, scheme: TypeScheme::monomorphic(list_ty.clone()) },
                ConstructorInfo {
                    name: "Cons".into(),
                    arity: 2,
                    scheme: TypeScheme::monomorphic(Type::function(
                        elem,
                        Type::function(list_ty.clone(), list_ty),
                    )),
                },
            ],
            alias: None,
            record_fields: None,
            record_defaults: None,
        },
        infectious: None,
    }
}

fn var_binding(name: &str, ty: Type) -> CoreValueBinding {
    CoreValueBinding {
        name: name.into(),
        value: CoreExprNode::new(CoreExpr::Var(name.into()), ty),
        exported: true,
        origin: None,
    }
}

/// spec.md §8 scenario S3: `List<Int>` and `List<Bool>` each produce a
/// zero-parameter specialization.
#[test]
fn raw_module_using_two_list_instantiations_specializes_both() {
    let mut decl_module = CoreModule::new("list");
    decl_module.type_declarations.push(list_decl());

    let mut main_module = CoreModule::new("main");
    main_module.mode = Some(Backend::Raw);
    main_module.values.push(var_binding("xs", Type::constructor("List", vec![Type::Int])));
    main_module.values.push(var_binding("ys", Type::constructor("List", vec![Type::Bool])));

    let mut graph = CoreModuleGraph::new("main");
    graph.insert_module(decl_module);
    graph.insert_module(main_module);

    let result = monomorphize_graph(&graph);
    assert_eq!(result.instantiations.len(), 2);
    let names: std::collections::HashSet<_> =
        result.instantiations.iter().map(|i| i.new_name.as_str().to_string()).collect();
    assert!(names.contains("List__Int"));
    assert!(names.contains("List__Bool"));

    let list_module = &result.graph.modules["list"];
    let int_decl = list_module
        .type_declarations
        .iter()
        .find(|d| d.name.as_str() == "List__Int")
        .expect("List__Int declared");
    assert!(int_decl.info.parameters.is_empty());
    let bool_decl = list_module
        .type_declarations
        .iter()
        .find(|d| d.name.as_str() == "List__Bool")
        .expect("List__Bool declared");
    assert!(bool_decl.info.parameters.is_empty());

    // the original generic `List` is dropped once both uses are concrete
    assert!(!list_module.type_declarations.iter().any(|d| d.name.as_str() == "List"));

    let main_out = &result.graph.modules["main"];
    let xs = main_out.find_value("xs").expect("xs");
    assert_eq!(xs.value.ty, Type::constructor("List__Int", vec![]));
}

/// spec.md §4.6 "Import plumbing": a module that uses a specialization but
/// doesn't emit it (the default case emits in the *declaring* module) gets
/// an import of the specialized name from wherever it landed.
#[test]
fn using_module_imports_specialization_emitted_elsewhere() {
    let mut decl_module = CoreModule::new("list");
    decl_module.type_declarations.push(list_decl());

    let mut main_module = CoreModule::new("main");
    main_module.mode = Some(Backend::Raw);
    main_module.values.push(var_binding("xs", Type::constructor("List", vec![Type::Int])));

    let mut graph = CoreModuleGraph::new("main");
    graph.insert_module(decl_module);
    graph.insert_module(main_module);

    let result = monomorphize_graph(&graph);
    let main_out = &result.graph.modules["main"];
    let import = main_out
        .imports
        .iter()
        .find(|i| i.specifier == "list")
        .expect("main imports the module that emits List__Int");
    assert!(import.bindings.iter().any(|b| b.as_str() == "List__Int"));
}

/// spec.md §4.6 "imports required for argument types are propagated": the
/// module that actually emits the specialization (the declaring module by
/// default) must import any argument type it doesn't already know about.
#[test]
fn emitting_module_imports_argument_types_it_does_not_already_know() {
    let pair_ty = Type::constructor("Pair", vec![]);
    let mut pair_module = CoreModule::new("pair");
    pair_module.type_declarations.push(MarkedTypeDecl {
        name: "Pair".into(),
        info: TypeInfo {
            parameters: vec![],
            constructors: vec![ConstructorInfo {
                name: "MkPair".into(),
                arity: 2,
                scheme: TypeScheme::monomorphic(Type::function(
                    Type::Int,
                    Type::function(Type::Int, pair_ty.clone()),
                )),
            }],
            alias: None,
            record_fields: None,
            record_defaults: None,
        },
        infectious: None,
    });

    let mut decl_module = CoreModule::new("list");
    decl_module.type_declarations.push(list_decl());

    let mut main_module = CoreModule::new("main");
    main_module.mode = Some(Backend::Raw);
    main_module.values.push(var_binding("xs", Type::constructor("List", vec![pair_ty])));

    let mut graph = CoreModuleGraph::new("main");
    graph.insert_module(pair_module);
    graph.insert_module(decl_module);
    graph.insert_module(main_module);

    let result = monomorphize_graph(&graph);
    // `List<Pair>` isn't localized (neither "list" nor "main" already name
    // `Pair`), so it specializes in the declaring module "list", which now
    // needs to import `Pair` from "pair" to reference it in `List__Pair`'s
    // `Cons` field.
    let list_out = &result.graph.modules["list"];
    let import = list_out
        .imports
        .iter()
        .find(|i| i.specifier == "pair")
        .expect("list imports Pair's declaring module");
    assert!(import.bindings.iter().any(|b| b.as_str() == "Pair"));
}

/// spec.md §9 open question: a simple join-and-squeeze mangling can collide
/// for pathological argument sets. `List<A_B>` and `List<A<B>>` both
/// squeeze their argument to the string `A_B`; the pass must still treat
/// them as two distinct instantiations rather than silently merging them.
#[test]
fn colliding_mangled_names_are_disambiguated() {
    let mut decl_module = CoreModule::new("list");
    decl_module.type_declarations.push(list_decl());

    let arg_a_b = Type::constructor("A_B", vec![]);
    let arg_a_of_b = Type::constructor("A", vec![Type::constructor("B", vec![])]);

    let mut main_module = CoreModule::new("main");
    main_module.mode = Some(Backend::Raw);
    main_module.values.push(var_binding("xs", Type::constructor("List", vec![arg_a_b.clone()])));
    main_module.values.push(var_binding("ys", Type::constructor("List", vec![arg_a_of_b.clone()])));

    let mut graph = CoreModuleGraph::new("main");
    graph.insert_module(decl_module);
    graph.insert_module(main_module);

    let result = monomorphize_graph(&graph);
    assert_eq!(result.instantiations.len(), 2);

    let names: std::collections::HashSet<_> =
        result.instantiations.iter().map(|i| i.new_name.as_str().to_string()).collect();
    assert_eq!(names.len(), 2, "distinct instantiations must get distinct names");

    let recovered: Vec<Vec<Type>> = result.instantiations.iter().map(|i| i.args.clone()).collect();
    assert!(recovered.contains(&vec![arg_a_b]));
    assert!(recovered.contains(&vec![arg_a_of_b]));
}

/// spec.md §8 scenario S4: a self-recursive, non-generic ADT's recursive
/// field becomes `Ptr<Self, ∅>` once monomorphized.
#[test]
fn self_recursive_zero_arity_adt_gets_pointer_field() {
    let node_ty = Type::constructor("Node", vec![]);
    let cons_ty = Type::function(Type::Int, Type::function(node_ty.clone(), node_ty.clone()));
    let decl = MarkedTypeDecl {
        name: "Node".into(),
        info: TypeInfo {
            parameters: vec![],
            constructors: vec![ConstructorInfo {
                name: "Cons".into(),
                arity: 2,
                scheme: TypeScheme::monomorphic(cons_ty),
            }],
            alias: None,
            record_fields: None,
            record_defaults: None,
        },
        infectious: None,
    };

    let mut module = CoreModule::new("node");
    module.mode = Some(Backend::Raw);
    module.type_declarations.push(decl);
    module.values.push(var_binding("n", node_ty));

    let mut graph = CoreModuleGraph::new("node");
    graph.insert_module(module);

    let result = monomorphize_graph(&graph);
    let out_module = &result.graph.modules["node"];
    assert!(!out_module.type_declarations.iter().any(|d| d.name.as_str() == "Node"));
    let node_prime = out_module
        .type_declarations
        .iter()
        .find(|d| d.name.as_str() == "Node__")
        .expect("Node__ declared");
    let cons = node_prime.info.find_constructor("Cons").expect("Cons");
    let (fields, _result_ty) = {
        let mut fields = Vec::new();
        let mut cur = &cons.scheme.ty;
        while let Type::Function { from, to } = cur {
            fields.push((**from).clone());
            cur = to;
        }
        (fields, cur.clone())
    };
    assert_eq!(fields[0], Type::Int);
    assert_eq!(fields[1], Type::constructor("Ptr", vec![Type::constructor("Node__", vec![]), Type::empty_row()]));
}

#[test]
fn non_raw_module_is_left_untouched() {
    let mut decl_module = CoreModule::new("list");
    decl_module.type_declarations.push(list_decl());
    let mut main_module = CoreModule::new("main");
    main_module.values.push(var_binding("xs", Type::constructor("List", vec![Type::Int])));
    let mut graph = CoreModuleGraph::new("main");
    graph.insert_module(decl_module);
    graph.insert_module(main_module);

    let result = monomorphize_graph(&graph);
    assert!(result.instantiations.is_empty());
    assert!(result.graph.modules["list"].type_declarations.iter().any(|d| d.name.as_str() == "List"));
}

#[test]
fn infectious_metadata_is_preserved_in_specialization() {
    let mut decl = list_decl();
    decl.infectious =
        Some(InfectiousMetadata { value_constructor: Some("Cons".into()), effect_constructors: vec!["Nil".into()] });
    let mut decl_module = CoreModule::new("list");
    decl_module.type_declarations.push(decl);
    let mut main_module = CoreModule::new("main");
    main_module.mode = Some(Backend::Raw);
    main_module.values.push(var_binding("xs", Type::constructor("List", vec![Type::Int])));
    let mut graph = CoreModuleGraph::new("main");
    graph.insert_module(decl_module);
    graph.insert_module(main_module);

    let result = monomorphize_graph(&graph);
    let list_module = &result.graph.modules["list"];
    let int_decl = list_module.type_declarations.iter().find(|d| d.name.as_str() == "List__Int").unwrap();
    assert!(int_decl.infectious.is_some());
}
