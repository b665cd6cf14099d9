use lpp_ast::error::ErrorKind;
use lpp_codegen::{generate, EmitOptions, Indent, DATACLASS_IMPORT};
use lpp_parse::parse_str;
use pretty_assertions::assert_eq;

fn python(src: &str) -> String {
    python_with(src, &EmitOptions::default())
}

fn python_with(src: &str, opts: &EmitOptions) -> String {
    let parsed = parse_str("<mem>", src).expect("parse ok");
    generate(&parsed.program, &parsed.symtab, opts).expect("codegen ok")
}

#[test]
fn read_then_write_scenario() {
    let out = python(
        "programa t
         var
           x : inteiro
         inicio
           leia x
           escreva x + 1
         fim",
    );
    assert_eq!(
        out,
        "# programa t\n\n# var\nx = 0\n\n# inicio\nx = int(input())\nprint(x + 1)\n# fim\n"
    );
}

#[test]
fn zero_values_per_declared_type() {
    let out = python(
        "programa t
         tipo
           ponto = registro
             x : inteiro
           fimregistro
         var
           c : caractere
           i : inteiro
           r : real
           l : logico
           v : conjunto[1..5] de inteiro
           m : conjunto[1..2, 1..3] de logico
           ps : conjunto[1..2] de ponto
           p : ponto
           a, b : real
         inicio
         fim",
    );
    let globals: Vec<&str> = out
        .lines()
        .skip_while(|l| *l != "# var")
        .skip(1)
        .take_while(|l| !l.is_empty())
        .collect();
    assert_eq!(
        globals,
        vec![
            "c = ''",
            "i = 0",
            "r = 0.0",
            "l = False",
            "v = [0] * 5",
            "m = [[False for _ in range(3)] for _ in range(2)]",
            "ps = [ponto() for _ in range(2)]",
            "p = ponto()",
            "a, b = 0.0, 0.0",
        ]
    );
}

#[test]
fn records_become_dataclasses() {
    let out = python(
        "programa r
         tipo
           ponto = registro
             x, y : inteiro
           fimregistro
           caixa = registro
             canto : ponto
             v : conjunto[1..3] de real
           fimregistro
         var
           p : ponto
         inicio
         fim",
    );
    assert_eq!(
        out,
        "\
from dataclasses import dataclass, field

# programa r

@dataclass
class ponto:
    x: int = 0
    y: int = 0

@dataclass
class caixa:
    canto: ponto = field(default_factory=ponto)
    v: list = field(default_factory=lambda: [0.0] * 3)

# var
p = ponto()

# inicio
# fim
"
    );
}

#[test]
fn import_appears_once_for_many_records() {
    let out = python(
        "programa r
         tipo
           a = registro x : inteiro fimregistro
           b = registro y : inteiro fimregistro
           c = registro z : inteiro fimregistro
         var
         inicio
         fim",
    );
    assert_eq!(out.matches(DATACLASS_IMPORT).count(), 1);
    assert!(out.starts_with(DATACLASS_IMPORT));
    assert_eq!(out.matches("@dataclass\n").count(), 3);
}

#[test]
fn no_import_without_records() {
    let out = python("programa t var inicio fim");
    assert!(!out.contains("import"));
    assert_eq!(out, "# programa t\n\n# var\n\n# inicio\n# fim\n");
}

#[test]
fn operator_chain_keeps_source_order() {
    let out = python(
        "programa t
         var
           a, b, c : inteiro
           l : logico
         inicio
           l <- a > b e c + 1
           l <- nao l ou a <> b
           c <- a mod 2 + b div 3 ^ 2
         fim",
    );
    assert!(out.contains("l = a > b and c + 1\n"), "{out}");
    assert!(out.contains("l = (not l) or a != b\n"), "{out}");
    assert!(out.contains("c = a % 2 + b // 3 ** 2\n"), "{out}");
}

#[test]
fn control_flow_indentation() {
    let out = python(
        "programa t
         var
           i, n : inteiro
         inicio
           leia n
           para i de 1 ate n faca
             se i mod 2 = 0 entao
               escreva \"par\", i
             senao
               escreva 'impar'
             fimse
           fimpara
           enquanto (n > 0) faca
             n <- n - 1
           fimenquanto
           para i de n ate 0 passo -1 faca
           fimpara
         fim",
    );
    assert_eq!(
        out,
        "\
# programa t

# var
i, n = 0, 0

# inicio
n = int(input())
for i in range(1, n, 1):
    if (i % 2 == 0):
        print(\"par\", i)
    else:
        print(\"impar\")
while (n > 0):
    n = n - 1
for i in range(n, 0, -1):
    pass
# fim
"
    );
}

#[test]
fn routines_with_locals_globals_and_returns() {
    let out = python(
        "programa t
         var
           total : real
           k : inteiro
         funcao media(a : real, b : real) : real
         var
           s : real
         inicio
           s <- a + b
           retorne s / 2
         fim
         procedimento acumula(x : real)
         inicio
           total <- total + x
           leia k
         fim
         procedimento nada
         inicio
         fim
         inicio
           total <- media(1.0, 2.5)
           acumula(total)
           nada
         fim",
    );
    assert_eq!(
        out,
        "\
# programa t

def media(a: float, b: float) -> float:
    s = 0.0
    s = a + b
    return s / 2

def acumula(x: float):
    global total, k
    total = total + x
    k = int(input())

def nada():
    pass

# var
total, k = 0.0, 0

# inicio
total = media(1.0, 2.5)
acumula(total)
nada()
# fim
"
    );
}

#[test]
fn reads_cast_by_place_type() {
    let out = python(
        "programa t
         tipo
           ponto = registro
             x : real
             nome : caractere
           fimregistro
         var
           ps : conjunto[1..3] de ponto
           m : conjunto[1..2, 1..2] de inteiro
           ok : logico
         inicio
           leia ps[1].x, ps[2].nome, m[1, 2], ok
         fim",
    );
    assert!(out.contains("ps[1].x = float(input())\n"), "{out}");
    assert!(out.contains("ps[2].nome = input()\n"), "{out}");
    assert!(out.contains("m[1][2] = int(input())\n"), "{out}");
    assert!(out.contains("ok = input()\n"), "{out}");
}

#[test]
fn literals_and_reserved_names() {
    let out = python(
        "programa t
         var
           lambda : logico
           s : caractere
           n : inteiro
         inicio
           lambda <- verdadeiro
           lambda <- falso
           s <- \"diz \\\"oi\\\"\"
           n <- 007
         fim",
    );
    assert!(out.contains("_lambda = False\n"), "{out}");
    assert!(out.contains("_lambda = True\n"), "{out}");
    assert!(out.contains("s = \"diz \\\"oi\\\"\"\n"), "{out}");
    assert!(out.contains("n = 7\n"), "{out}");
}

#[test]
fn tab_indentation_option() {
    let out = python_with(
        "programa t var x : inteiro inicio se x > 0 entao x <- 0 fimse fim",
        &EmitOptions { indent: Indent::Tab },
    );
    assert!(out.contains("if (x > 0):\n\tx = 0\n"), "{out}");

    let out = python_with(
        "programa t var x : inteiro inicio se x > 0 entao x <- 0 fimse fim",
        &EmitOptions {
            indent: Indent::Spaces(2),
        },
    );
    assert!(out.contains("if (x > 0):\n  x = 0\n"), "{out}");
}

#[test]
fn three_dimensional_arrays_are_unimplemented() {
    let parsed = parse_str(
        "<mem>",
        "programa t
         var
           cubo : conjunto[1..2, 1..2, 1..2] de inteiro
         inicio
         fim",
    )
    .expect("parse ok");
    let err = generate(&parsed.program, &parsed.symtab, &EmitOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnimplementedConstruct);
    assert_eq!(err.span().line, 3);
}

#[test]
fn output_always_ends_with_newline() {
    let out = python("programa t var inicio escreva 1 fim");
    assert!(out.ends_with("# fim\n"));
}

#[test]
fn negation_inside_a_chain_is_parenthesised() {
    let out = python(
        "programa p
         var
           a, b : logico
           n : inteiro
         inicio
           se a = nao b entao
             escreva 1
           fimse
           a <- nao a
           a <- n > 0 e nao b
           a <- nao a = b
           a <- - nao b
         fim",
    );
    assert!(out.contains("if (a == (not b)):\n"), "{out}");
    assert!(out.contains("a = not a\n"), "{out}");
    assert!(out.contains("a = n > 0 and (not b)\n"), "{out}");
    assert!(out.contains("a = (not a) == b\n"), "{out}");
    assert!(out.contains("a = -(not b)\n"), "{out}");
}

#[test]
fn renamed_reserved_words_stay_distinct_from_user_names() {
    let out = python(
        "programa p
         var
           print, print_ : inteiro
         inicio
           print <- 1
           print_ <- 2
           escreva print
         fim",
    );
    assert!(out.contains("_print, print_ = 0, 0\n"), "{out}");
    assert!(out.contains("_print = 1\n"), "{out}");
    assert!(out.contains("print_ = 2\n"), "{out}");
    assert!(out.contains("print(_print)\n"), "{out}");
}

#[test]
fn procedures_have_no_return_annotation() {
    let out = python(
        "programa p
         var
           x : inteiro
         procedimento zera(v : inteiro)
         inicio
           x <- v
         fim
         funcao um : inteiro
         inicio
           retorne 1
         fim
         funcao dois
         inicio
           retorne 2
         fim
         inicio
           zera(um)
           zera(dois)
         fim",
    );
    assert!(out.contains("def zera(v: int):\n"), "{out}");
    assert!(out.contains("def um() -> int:\n"), "{out}");
    assert!(out.contains("def dois() -> None:\n"), "{out}");
}
