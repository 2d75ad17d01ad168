use nalgebra::{Point3, Vector3};
use std::collections::HashMap;
use std::iter::Peekable;
use std::str::FromStr;

use super::{
    lexer::{Lexeme, Lexer, Token},
    Error,
};
use crate::{
    camera::Camera,
    canvas::Color,
    light::Light,
    material::Material,
    scene::{Animation, Compositing, Scene},
    shape::Sphere,
};

type Result<T> = std::result::Result<T, Error>;

/// Parse a scene description. The camera viewport is `width` by `height` pixels; a scene without a
/// `camera` command looks down `+z` from the origin with a 60 degree field of view.
pub fn parse(input: &str, width: u32, height: u32) -> Result<Scene> {
    let camera = Camera::new(Point3::origin(), Vector3::z(), width, height, 60.);
    let mut parser = Parser::new(Lexer::new(input), Scene::new(camera));
    parser.parse()?;
    Ok(parser.scene)
}

struct Parser<'a> {
    lexer: Peekable<Lexer<'a>>,
    scene: Scene,
    materials: HashMap<String, Material>,
}

impl<'a> Parser<'a> {
    fn new(lexer: Lexer<'a>, scene: Scene) -> Self {
        Self {
            lexer: lexer.peekable(),
            scene,
            materials: HashMap::new(),
        }
    }

    fn token(&mut self, expected: &'static str) -> Result<Lexeme> {
        match self.lexer.next() {
            Some(lexeme) if lexeme.token == Token::Error => Err(Error::LexerError {
                line: lexeme.line,
                text: lexeme.text,
            }),
            Some(lexeme) => Ok(lexeme),
            None => Err(Error::UnexpectedEnd { expected }),
        }
    }

    fn guard(&mut self, token: Token, expected: &'static str) -> Result<Lexeme> {
        let tok = self.token(expected)?;
        if tok.token != token {
            Err(Error::Unexpected {
                line: tok.line,
                expected,
                found: tok.text,
            })
        } else {
            Ok(tok)
        }
    }

    fn lparen(&mut self) -> Result<()> {
        self.guard(Token::LParen, "`(`")?;
        Ok(())
    }

    fn rparen(&mut self) -> Result<()> {
        self.guard(Token::RParen, "`)`")?;
        Ok(())
    }

    fn ident(&mut self) -> Result<Lexeme> {
        self.guard(Token::Ident, "a name")
    }

    fn number(&mut self) -> Result<f32> {
        let tok = self.guard(Token::Number, "a number")?;
        f32::from_str(&tok.text).map_err(|_| Error::InvalidNumber {
            line: tok.line,
            text: tok.text,
        })
    }

    fn index(&mut self) -> Result<usize> {
        let tok = self.guard(Token::Number, "an index")?;
        usize::from_str(&tok.text).map_err(|_| Error::InvalidNumber {
            line: tok.line,
            text: tok.text,
        })
    }

    fn color(&mut self) -> Result<Color> {
        let tok = self.guard(Token::Color, "a color")?;
        Color::from_hex(&tok.text).ok_or(Error::InvalidColor {
            line: tok.line,
            text: tok.text,
        })
    }

    fn triple(&mut self) -> Result<(f32, f32, f32)> {
        self.lparen()?;
        let x = self.number()?;
        let y = self.number()?;
        let z = self.number()?;
        self.rparen()?;
        Ok((x, y, z))
    }

    fn point(&mut self) -> Result<Point3<f32>> {
        let (x, y, z) = self.triple()?;
        Ok(Point3::new(x, y, z))
    }

    fn vector(&mut self) -> Result<Vector3<f32>> {
        let (x, y, z) = self.triple()?;
        Ok(Vector3::new(x, y, z))
    }

    fn peek_rparen(&mut self) -> bool {
        if let Some(tok) = self.lexer.peek() {
            tok.token == Token::RParen
        } else {
            false
        }
    }

    /// `(ambient diffuse specular shininess) #color`
    fn parse_material(&mut self) -> Result<Material> {
        self.lparen()?;
        let ambient = self.number()?;
        let diffuse = self.number()?;
        let specular = self.number()?;
        let shininess = self.number()?;
        self.rparen()?;
        let color = self.color()?;
        Ok(Material::new(ambient, diffuse, specular, shininess).with_color(color))
    }

    fn parse_command(&mut self) -> Result<()> {
        self.lparen()?;

        let command = self.ident()?;
        match command.text.as_str() {
            "camera" => {
                let position = self.point()?;
                let direction = self.vector()?;
                let fov = self.number()?;
                let (width, height) = (self.scene.camera.width(), self.scene.camera.height());
                self.scene.camera = Camera::new(position, direction, width, height, fov);
            }

            "material" => {
                let name = self.ident()?;
                let material = self.parse_material()?;
                self.materials.insert(name.text, material);
            }

            "sphere" => {
                let center = self.point()?;
                let radius = self.number()?;
                let material = if self.peek_rparen() {
                    Material::default()
                } else {
                    let name = self.ident()?;
                    self.materials
                        .get(&name.text)
                        .cloned()
                        .ok_or(Error::UnknownMaterial {
                            line: name.line,
                            name: name.text,
                        })?
                };
                self.scene
                    .shapes
                    .push(Box::new(Sphere::new(radius, center).with_material(material)));
            }

            "light" => {
                let position = self.point()?;
                let intensity = self.number()?;
                let color = self.color()?;
                self.scene
                    .lights
                    .push(Light::new(position, intensity, color));
            }

            "animate" => {
                let light = self.index()?;
                let offset = self.vector()?;
                let intensity_step = self.number()?;
                self.scene.animation = Some(Animation {
                    light,
                    offset,
                    intensity_step,
                });
            }

            "max-distance" => {
                self.scene.config.max_distance = self.number()?;
            }

            "compositing" => {
                let mode = self.ident()?;
                self.scene.config.compositing = match mode.text.as_str() {
                    "nearest" => Compositing::NearestHit,
                    "last" => Compositing::LastHit,
                    _ => {
                        return Err(Error::UnknownCompositing {
                            line: mode.line,
                            name: mode.text.clone(),
                        })
                    }
                };
            }

            _ => {
                return Err(Error::UnknownCommand {
                    line: command.line,
                    name: command.text.clone(),
                })
            }
        }

        self.rparen()?;

        Ok(())
    }

    fn parse(&mut self) -> Result<()> {
        while self.lexer.peek().is_some() {
            self.parse_command()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLASSIC: &str = "
        ; a single blue sphere under a white light
        (camera (0 0 0) (0 0 1) 60)
        (material blue (0.3 1 0.8 20) #0000ff)
        (sphere (1 0 3) 1 blue)
        (light (1 1.4 0) 5 #ffffff)
    ";

    #[test]
    fn test_parse_classic() {
        let scene = parse(CLASSIC, 600, 400).expect("scene");
        let classic = Scene::classic(600, 400);

        assert_eq!(600, scene.camera.width());
        assert_eq!(400, scene.camera.height());
        assert_eq!(classic.lights, scene.lights);
        assert_eq!(1, scene.shapes.len());
        assert_eq!(classic.shapes[0].material(), scene.shapes[0].material());
        assert!(scene.animation.is_none());
    }

    #[test]
    fn test_parse_settings() {
        let input = "
            (light (0 0 0) 1 #ff8000)
            (animate 0 (0.01 0 -0.5) 0.1)
            (max-distance 25)
            (compositing last)
            (sphere (0 0 3) 0.5)
        ";
        let scene = parse(input, 10, 10).expect("scene");

        assert_eq!(25., scene.config.max_distance);
        assert_eq!(Compositing::LastHit, scene.config.compositing);
        assert_eq!(
            Some(Animation {
                light: 0,
                offset: Vector3::new(0.01, 0., -0.5),
                intensity_step: 0.1,
            }),
            scene.animation
        );
        assert_eq!(&Material::default(), scene.shapes[0].material());
        assert_eq!(Color::new(1., 128. / 255., 0.), scene.lights[0].color);
    }

    #[test]
    fn test_parse_empty() {
        let scene = parse("  ; nothing here\n", 4, 4).expect("scene");
        assert!(scene.shapes.is_empty());
        assert!(scene.lights.is_empty());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Err(Error::UnknownMaterial {
                line: 1,
                name: String::from("red"),
            }),
            parse("(sphere (0 0 0) 1 red)", 4, 4).map(|_| ())
        );

        assert_eq!(
            Err(Error::UnknownCommand {
                line: 2,
                name: String::from("cube"),
            }),
            parse("(light (0 0 0) 1 #ffffff)\n(cube 1)", 4, 4).map(|_| ())
        );

        assert_eq!(
            Err(Error::UnexpectedEnd { expected: "`)`" }),
            parse("(max-distance 10", 4, 4).map(|_| ())
        );

        assert_eq!(
            Err(Error::Unexpected {
                line: 1,
                expected: "a number",
                found: String::from("far"),
            }),
            parse("(max-distance far)", 4, 4).map(|_| ())
        );

        assert_eq!(
            Err(Error::InvalidNumber {
                line: 1,
                text: String::from("1.5"),
            }),
            parse("(animate 1.5 (0 0 0) 1)", 4, 4).map(|_| ())
        );

        assert_eq!(
            Err(Error::InvalidColor {
                line: 1,
                text: String::from("#fff"),
            }),
            parse("(light (0 0 0) 1 #fff)", 4, 4).map(|_| ())
        );

        assert_eq!(
            Err(Error::LexerError {
                line: 1,
                text: String::from("@"),
            }),
            parse("(light @)", 4, 4).map(|_| ())
        );

        assert_eq!(
            Err(Error::UnknownCompositing {
                line: 1,
                name: String::from("first"),
            }),
            parse("(compositing first)", 4, 4).map(|_| ())
        );
    }
}
