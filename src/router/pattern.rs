// ============================================================================
// ROUTE PATTERN - Segmentos literales, `:param` y `:param(regex)`
// ============================================================================

use std::borrow::Cow;
use std::collections::BTreeMap;

use regex::Regex;

use super::RouteError;

/// Parámetros capturados por una ruta (`:recipeId` -> "42")
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams(BTreeMap<String, String>);

impl RouteParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RouteParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Param(String),
    /// `:name(regex)`; en el último segmento (`tail`) consume el resto del path
    Constrained {
        name: String,
        source: String,
        regex: Regex,
        tail: bool,
    },
}

#[derive(Debug, Clone)]
pub struct RoutePattern {
    source: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    pub fn parse(pattern: &str) -> Result<Self, RouteError> {
        let invalid = |reason: &str| RouteError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        if !pattern.starts_with('/') {
            return Err(invalid("debe empezar con '/'"));
        }

        let raw_segments: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
        let last = raw_segments.len().saturating_sub(1);
        let mut segments = Vec::with_capacity(raw_segments.len());

        for (index, raw) in raw_segments.into_iter().enumerate() {
            let Some(param) = raw.strip_prefix(':') else {
                if raw.contains(':') || raw.contains('(') {
                    return Err(invalid("segmento literal con ':' o '('"));
                }
                segments.push(Segment::Literal(raw.to_string()));
                continue;
            };

            let (name, constraint) = match param.split_once('(') {
                Some((name, rest)) => {
                    let source = rest
                        .strip_suffix(')')
                        .ok_or_else(|| invalid("falta ')' en el parámetro"))?;
                    (name, Some(source))
                }
                None => (param, None),
            };

            if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(invalid("nombre de parámetro inválido"));
            }
            if segments.iter().any(|s| segment_name(s) == Some(name)) {
                return Err(invalid("parámetro repetido"));
            }

            segments.push(match constraint {
                None => Segment::Param(name.to_string()),
                Some(source) => {
                    let regex = Regex::new(&format!("(?s)^(?:{})$", source))
                        .map_err(|e| invalid(&e.to_string()))?;
                    Segment::Constrained {
                        name: name.to_string(),
                        source: source.to_string(),
                        regex,
                        tail: index == last,
                    }
                }
            });
        }

        Ok(Self {
            source: pattern.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// `/:nombre(.*)`: acepta cualquier path
    pub fn is_catch_all(&self) -> bool {
        matches!(
            self.segments.as_slice(),
            [Segment::Constrained { source, tail: true, .. }] if source == ".*"
        )
    }

    /// Intenta casar con los segmentos ya normalizados del path.
    /// Los valores capturados se entregan ya decodificados (`caf%C3%A9` -> `café`).
    pub fn match_segments(&self, path: &[&str]) -> Option<RouteParams> {
        let mut params = RouteParams::new();

        for (index, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Constrained {
                    name,
                    regex,
                    tail: true,
                    ..
                } => {
                    let rest = decode(&path.get(index..).unwrap_or_default().join("/"));
                    if !regex.is_match(&rest) {
                        return None;
                    }
                    params.insert(name.as_str(), rest);
                    return Some(params);
                }
                Segment::Constrained { name, regex, .. } => {
                    let value = decode(path.get(index)?);
                    if !regex.is_match(&value) {
                        return None;
                    }
                    params.insert(name.as_str(), value);
                }
                Segment::Param(name) => {
                    params.insert(name.as_str(), decode(path.get(index)?));
                }
                Segment::Literal(literal) => {
                    // Igual que el router del navegador: sin distinguir mayúsculas
                    if !path.get(index)?.eq_ignore_ascii_case(literal) {
                        return None;
                    }
                }
            }
        }

        (path.len() == self.segments.len()).then_some(params)
    }

    /// Construir un path concreto a partir de parámetros (valores sin codificar)
    pub fn build(&self, params: &RouteParams) -> Option<String> {
        let mut path = String::new();

        for segment in &self.segments {
            let piece: Cow<'_, str> = match segment {
                Segment::Literal(literal) => Cow::Borrowed(literal.as_str()),
                Segment::Param(name) => {
                    urlencoding::encode(params.get(name).filter(|v| !v.is_empty())?)
                }
                Segment::Constrained {
                    name, regex, tail, ..
                } => {
                    let value = params.get(name)?;
                    if !regex.is_match(value) {
                        return None;
                    }
                    if *tail {
                        // El resto del path conserva sus '/'
                        let pieces: Vec<Cow<'_, str>> = value
                            .split('/')
                            .filter(|s| !s.is_empty())
                            .map(urlencoding::encode)
                            .collect();
                        Cow::Owned(pieces.join("/"))
                    } else {
                        urlencoding::encode(value)
                    }
                }
            };
            if !piece.is_empty() {
                path.push('/');
                path.push_str(&piece);
            }
        }

        if path.is_empty() {
            path.push('/');
        }
        Some(path)
    }
}

fn segment_name(segment: &Segment) -> Option<&str> {
    match segment {
        Segment::Literal(_) => None,
        Segment::Param(name) | Segment::Constrained { name, .. } => Some(name),
    }
}

/// Secuencias inválidas en UTF-8 se sustituyen en vez de descartar la ruta
fn decode(raw: &str) -> String {
    String::from_utf8_lossy(&urlencoding::decode_binary(raw.as_bytes())).into_owned()
}

/// Quita query y fragmento, y descarta segmentos vacíos (`//`, `/` final)
pub fn split_path(path: &str) -> Vec<&str> {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    path[..end].split('/').filter(|s| !s.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn matches(pattern: &str, path: &str) -> Option<RouteParams> {
        RoutePattern::parse(pattern)
            .unwrap()
            .match_segments(&split_path(path))
    }

    #[rstest]
    #[case("/", "/")]
    #[case("/", "")]
    #[case("/about", "/about")]
    #[case("/about", "/About/")]
    #[case("/my-recipes", "/my-recipes?sort=asc#top")]
    fn test_literal_patterns_match(#[case] pattern: &str, #[case] path: &str) {
        assert_eq!(matches(pattern, path), Some(RouteParams::new()));
    }

    #[rstest]
    #[case("/about", "/")]
    #[case("/about", "/about/team")]
    #[case("/recipe/:recipeId", "/recipe")]
    #[case("/recipe/:recipeId", "/recipe/1/2")]
    #[case("/recipe/:recipeId(\\d+)", "/recipe/abc")]
    fn test_patterns_reject(#[case] pattern: &str, #[case] path: &str) {
        assert_eq!(matches(pattern, path), None);
    }

    #[test]
    fn test_param_binding() {
        let params = matches("/recipe/:recipeId", "/recipe/42").unwrap();
        assert_eq!(params.get("recipeId"), Some("42"));
        assert_eq!(params.len(), 1);

        let params = matches("/recipe/:recipeId(\\d+)", "/recipe/7").unwrap();
        assert_eq!(params.get("recipeId"), Some("7"));
    }

    #[rstest]
    #[case("/", "")]
    #[case("/unknown/path", "unknown/path")]
    #[case("/a//b/?x=1", "a/b")]
    fn test_catch_all_captures_rest(#[case] path: &str, #[case] captured: &str) {
        let pattern = RoutePattern::parse("/:catchAll(.*)").unwrap();
        assert!(pattern.is_catch_all());
        let params = pattern.match_segments(&split_path(path)).unwrap();
        assert_eq!(params.get("catchAll"), Some(captured));
    }

    #[test]
    fn test_tail_constraint_is_not_catch_all_unless_dot_star() {
        assert!(!RoutePattern::parse("/files/:rest(.*)").unwrap().is_catch_all());
        assert!(!RoutePattern::parse("/:id(\\d+)").unwrap().is_catch_all());
    }

    #[rstest]
    #[case("about")]
    #[case("/recipe/:")]
    #[case("/recipe/:id(\\d+")]
    #[case("/recipe/:id([)")]
    #[case("/recipe/:id/:id")]
    #[case("/rec:ipe")]
    #[case("/recipe/:re-cipe")]
    fn test_invalid_patterns(#[case] pattern: &str) {
        assert!(matches!(
            RoutePattern::parse(pattern),
            Err(RouteError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_build_paths() {
        let recipe = RoutePattern::parse("/recipe/:recipeId").unwrap();
        let params: RouteParams = [("recipeId", "42")].into_iter().collect();
        assert_eq!(recipe.build(&params).as_deref(), Some("/recipe/42"));
        assert_eq!(recipe.build(&RouteParams::new()), None);

        let root = RoutePattern::parse("/").unwrap();
        assert_eq!(root.build(&RouteParams::new()).as_deref(), Some("/"));

        let catch_all = RoutePattern::parse("/:catchAll(.*)").unwrap();
        let params: RouteParams = [("catchAll", "a/b")].into_iter().collect();
        assert_eq!(catch_all.build(&params).as_deref(), Some("/a/b"));
    }

    #[rstest]
    #[case("/recipe/caf%C3%A9", "café")]
    #[case("/recipe/pan%20de%20ajo", "pan de ajo")]
    #[case("/recipe/a%2Fb", "a/b")]
    #[case("/recipe/42", "42")]
    fn test_params_are_percent_decoded(#[case] path: &str, #[case] bound: &str) {
        let params = matches("/recipe/:recipeId", path).unwrap();
        assert_eq!(params.get("recipeId"), Some(bound));
    }

    #[test]
    fn test_constraints_see_decoded_values() {
        let params = matches("/recipe/:recipeId(\\d+)", "/recipe/%34%32").unwrap();
        assert_eq!(params.get("recipeId"), Some("42"));

        let params = matches("/:catchAll(.*)", "/caf%C3%A9/men%C3%BA").unwrap();
        assert_eq!(params.get("catchAll"), Some("café/menú"));
    }

    #[test]
    fn test_build_encodes_values() {
        let recipe = RoutePattern::parse("/recipe/:recipeId").unwrap();
        let params: RouteParams = [("recipeId", "café")].into_iter().collect();
        let path = recipe.build(&params).unwrap();
        assert_eq!(path, "/recipe/caf%C3%A9");
        assert_eq!(matches("/recipe/:recipeId", &path), Some(params));

        let params: RouteParams = [("recipeId", "a/b")].into_iter().collect();
        assert_eq!(recipe.build(&params).as_deref(), Some("/recipe/a%2Fb"));

        let catch_all = RoutePattern::parse("/:catchAll(.*)").unwrap();
        let params: RouteParams = [("catchAll", "mis recetas/café")].into_iter().collect();
        assert_eq!(
            catch_all.build(&params).as_deref(),
            Some("/mis%20recetas/caf%C3%A9")
        );
    }

    #[test]
    fn test_dot_matches_newlines() {
        let params = matches("/:catchAll(.*)", "/a\nb").unwrap();
        assert_eq!(params.get("catchAll"), Some("a\nb"));

        let params = matches("/:catchAll(.*)", "/a%0Ab").unwrap();
        assert_eq!(params.get("catchAll"), Some("a\nb"));
    }
}
