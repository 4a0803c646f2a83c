use yew::{html, AttrValue, Children, Component, Context, Html, Properties};

#[derive(Properties, PartialEq)]
pub struct OptionGridProps {
    pub columns: usize,
    #[prop_or_default]
    pub label: Option<AttrValue>,
    pub children: Children,
}

/// Lays out a closed set of toggle buttons in equal-width columns.
pub struct OptionGrid;

impl Component for OptionGrid {
    type Message = ();
    type Properties = OptionGridProps;

    fn create(_ctx: &Context<Self>) -> Self {
        OptionGrid
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let style = format!(
            "display: grid;
             grid-template-columns: repeat({}, 1fr);
             gap: 8px;",
            props.columns.max(1)
        );

        html! {
            <div class="option-grid" role="group" aria-label={props.label.clone()} style={style}>
                { for props.children.iter() }
            </div>
        }
    }
}
