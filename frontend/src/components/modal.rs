use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub title: AttrValue,
    pub on_close: Callback<()>,
    pub children: Children,
}

#[function_component(Modal)]
pub fn modal(props: &ModalProps) -> Html {
    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_| on_close.emit(()))
    };

    html! {
        <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/60">
            <div class="w-full max-w-lg bg-[#23272f] border border-[#333] rounded-2xl shadow-lg p-6">
                <h2 class="text-lg font-bold text-[#90caf9] mb-4">{ props.title.clone() }</h2>
                { for props.children.iter() }
                <div class="flex justify-end mt-4">
                    <button type="button" class="text-sm text-slate-300 hover:text-white" onclick={on_close}>{"Cancel"}</button>
                </div>
            </div>
        </div>
    }
}
