use basta::renderer::{get_renderer, Engine, GoTemplateRenderer, MiniJinjaRenderer, TemplateRenderer};
use serde_json::json;

const DEMO: &str = r#"package source

func GetDescription() string {
	return `
My name is {{.name}}, and I am {{.age}} years old. I like:
{{define "interestsList"}}- {{.}}{{end}}{{range $i := .interests}}
    {{template "interestsList" $i}}
{{end}}
This is my favorite quote: "{{.quote}}"
`
}
"#;

#[test]
fn test_demo_template() {
    let context = json!({
        "name": "bob",
        "age": 5,
        "interests": ["trains", "lego"],
        "quote": "choo choo"
    });

    let out = GoTemplateRenderer::new().render(DEMO, &context).unwrap();

    assert!(out.contains("My name is bob, and I am 5 years old. I like:\n"));
    assert!(out.contains("\n    - trains\n"));
    assert!(out.contains("\n    - lego\n"));
    assert!(out.contains(r#"This is my favorite quote: "choo choo""#));
    assert!(!out.contains("{{"));
}

#[test]
fn test_demo_template_needs_every_variable() {
    let context = json!({"name": "bob", "age": 5, "interests": []});
    assert!(GoTemplateRenderer::new().render(DEMO, &context).is_err());
}

#[test]
fn test_go_renderer_paths() {
    let renderer = GoTemplateRenderer::new();
    let context = json!({"name": "alice", "with_tests": true});

    assert_eq!(renderer.render("{{.name}}.go", &context).unwrap(), "alice.go");
    assert_eq!(
        renderer
            .render("{{if .with_tests}}tests/{{.name}}_test.go{{end}}", &context)
            .unwrap(),
        "tests/alice_test.go"
    );
}

#[test]
fn test_minijinja_engine() {
    let engine = MiniJinjaRenderer::new();
    let context = json!({
        "name": "test",
        "value": 42
    });

    let result = engine.render("Hello {{ name }}!", &context).unwrap();
    assert_eq!(result, "Hello test!");

    let result = engine.render("Value: {{ value }}", &context).unwrap();
    assert_eq!(result, "Value: 42");
}

#[test]
fn test_engines_classify_differently() {
    let go = get_renderer(Engine::Go);
    let jinja = get_renderer(Engine::Jinja);

    assert!(go.is_template("{{range .xs}}{{.}}{{end}}"));
    assert!(!jinja.is_template("{{range .xs}}{{.}}{{end}}"));
    assert!(jinja.is_template("{% for x in xs %}{{ x }}{% endfor %}"));
}
