use crate::{
    Token,
    tokenizer::element::{Context, Element},
    utils::common_prefix_len::common_prefix_len,
};

/// Wraps every maximal run of tokens matching `predicate` in `element`.
///
/// The element is inserted into each selected token's context. A run starts
/// its wrapper at the depth where its first token's context diverges from
/// the previous token's, and keeps using that depth for as long as the
/// following tokens stay inside it. The wrapper is only closed and reopened
/// where the run leaves that subtree, so it nests correctly even when the
/// real elements around it change.
///
/// Call it once per kind of wrapper; later calls see the elements inserted by
/// earlier ones.
///
/// ```
/// use reconcile_html::{Element, insert_tag, render, tokenize};
///
/// let mut tokens = tokenize("<p>one two <b>three</b></p>").unwrap();
/// insert_tag(&mut tokens, &Element::synthetic("mark"), |token| {
///     token.text_content() != Some("one")
/// });
///
/// assert_eq!(render(&tokens), "<p>one<mark> two <b>three</b></mark></p>");
/// ```
pub fn insert_tag<I, F>(items: &mut [I], element: &Element, mut predicate: F)
where
    I: AsRef<Token> + AsMut<Token>,
    F: FnMut(&I) -> bool,
{
    let mut wrap_prefix: Option<Context> = None;
    let mut last_context = Context::new();

    for item in items.iter_mut() {
        if predicate(item) {
            let token = item.as_mut();

            let prefix = match wrap_prefix.take() {
                Some(prefix) if starts_with(token.context(), &prefix) => prefix,
                _ => {
                    let context = token.context();
                    let depth =
                        common_prefix_len(&last_context, 0..last_context.len(), context, 0..context.len());
                    context.take(depth)
                }
            };

            token.insert_into_context(prefix.len(), element.clone());
            wrap_prefix = Some(prefix);
        } else {
            wrap_prefix = None;
        }

        last_context = item.as_ref().context().clone();
    }
}

fn starts_with(context: &Context, prefix: &Context) -> bool {
    prefix.len() <= context.len()
        && common_prefix_len(context, 0..prefix.len(), prefix, 0..prefix.len()) == prefix.len()
}
