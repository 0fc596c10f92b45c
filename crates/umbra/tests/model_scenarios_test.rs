//! End-to-end scenarios over the public model API.

use std::collections::HashMap;

use umbra::{
    ModelGraph,
    codegen::{CodeGenerator, DeclarationGenerator},
    geometry::{Bounds, Point, Size},
    interaction::{ConnectorOutcome, ConnectorTool},
    project::{LoadedProject, MemoryProjectStore, ProjectStore},
    route::{OrthogonalRouter, RelationshipRouter},
    semantic::{EntityKind, RelationshipKind, Visibility},
};

fn rect(x: f32, y: f32, width: f32, height: f32) -> Bounds {
    Bounds::new_from_top_left(Point::new(x, y), Size::new(width, height))
}

#[test]
fn test_animal_declaration() {
    let mut model = ModelGraph::new();
    let animal = model.create_entity(EntityKind::Class, "Animal").unwrap();
    model.add_attribute(animal, "public", "name", "String").unwrap();
    model.add_operation(animal, "public", "speak", "void").unwrap();

    let text = DeclarationGenerator::default()
        .generate(&model, animal)
        .unwrap();

    assert_eq!(
        text,
        "class Animal {\n  public String name;\n  public void speak { }\n}"
    );
}

#[test]
fn test_child_extends_parent() {
    let mut model = ModelGraph::new();
    let parent = model.create_entity(EntityKind::Class, "Parent").unwrap();
    let child = model.create_entity(EntityKind::Class, "Child").unwrap();
    model
        .add_relationship(parent, child, RelationshipKind::Inheritance, "1", "1", "")
        .unwrap();

    let text = DeclarationGenerator::default()
        .generate(&model, child)
        .unwrap();

    assert!(text.starts_with("class Child extends Parent {"));
}

#[test]
fn test_remove_cascades_to_every_relationship() {
    let mut model = ModelGraph::new();
    let a = model.create_entity(EntityKind::Class, "A").unwrap();
    let b = model.create_entity(EntityKind::Class, "B").unwrap();
    let c = model.create_entity(EntityKind::Class, "C").unwrap();
    model
        .add_relationship(a, b, RelationshipKind::Association, "", "", "")
        .unwrap();
    model
        .add_relationship(a, c, RelationshipKind::Composition, "", "", "")
        .unwrap();

    model.remove_entity(a);

    assert_eq!(model.relationship_count(), 0);
    assert!(model.relationships_touching(b).is_empty());
    assert!(model.relationships_touching(c).is_empty());
    assert!(model.entity(a).is_none());
}

#[test]
fn test_visibility_validation_keeps_prior_value() {
    let mut model = ModelGraph::new();
    let a = model.create_entity(EntityKind::Class, "A").unwrap();
    let field = model.add_attribute(a, "public", "x", "int").unwrap();

    model.set_member_visibility(a, field, "private").unwrap();
    assert_eq!(model.member_visibility(a, field).unwrap(), Visibility::Private);

    assert!(model.set_member_visibility(a, field, "internal").is_err());
    assert_eq!(model.member_visibility(a, field).unwrap(), Visibility::Private);
}

#[test]
fn test_connector_then_route_then_move() {
    let mut model = ModelGraph::new();
    let whole = model.create_entity(EntityKind::Class, "Whole").unwrap();
    let part = model.create_entity(EntityKind::Class, "Part").unwrap();

    let mut tool = ConnectorTool::new(RelationshipKind::Composition);
    tool.select(&mut model, whole).unwrap();
    let ConnectorOutcome::Created(link) = tool.select(&mut model, part).unwrap() else {
        panic!("expected a relationship");
    };

    let router = OrthogonalRouter::default();
    let mut geometry = HashMap::from([
        (whole, rect(0.0, 0.0, 100.0, 50.0)),
        (part, rect(300.0, 0.0, 100.0, 50.0)),
    ]);
    let before = router.recompute(&model, &geometry).unwrap();
    assert_eq!(before[&link].end(), Point::new(300.0, 25.0));

    // Moving the part below the whole flips the connection to vertical
    geometry.insert(part, rect(0.0, 300.0, 100.0, 50.0));
    let after = router.recompute_touching(&model, &geometry, part).unwrap();
    assert_eq!(after[&link].end(), Point::new(50.0, 300.0));
    assert!(after[&link].marker().unwrap().style().is_filled());
}

#[test]
fn test_project_store_round_trip() {
    let mut model = ModelGraph::new();
    let shape = model.create_entity(EntityKind::Interface, "Shape").unwrap();
    let circle = model.create_entity(EntityKind::Class, "Circle").unwrap();
    model.add_operation(shape, "public", "area", "double").unwrap();
    model.add_attribute(circle, "private", "radius", "double").unwrap();
    model
        .add_relationship(shape, circle, RelationshipKind::Inheritance, "", "", "")
        .unwrap();

    let mut store = MemoryProjectStore::new();
    store.save(&model.snapshot("shapes")).unwrap();

    let loaded = LoadedProject::replay(&store.load("shapes").unwrap()).unwrap();
    let generator = DeclarationGenerator::default();

    assert_eq!(
        generator.generate_all(loaded.model()),
        generator.generate_all(&model)
    );
}
