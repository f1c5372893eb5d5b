use rhai::Engine;

use std::sync::mpsc;

#[derive(Debug, Clone)]
pub enum HostMsg{
    Kill,
    LoadFirst(String),
    LoadSecond(String),
    Save(String),
    Reset,
}

pub struct HostPortals{
    pub to_host: mpsc::Sender<HostMsg>,
    pub first_from_host: mpsc::Receiver<bool>,
    pub second_from_host: mpsc::Receiver<bool>,
    pub save_from_host: mpsc::Receiver<bool>,
}

pub struct RhaiPortals{
    pub from_rhai: mpsc::Receiver<HostMsg>,
    pub first_to_rhai: mpsc::Sender<bool>,
    pub second_to_rhai: mpsc::Sender<bool>,
    pub save_to_rhai: mpsc::Sender<bool>,
}

pub fn create_channels() -> (HostPortals, RhaiPortals){
    let (to_host, from_rhai) = mpsc::channel();
    let (first_to_rhai, first_from_host) = mpsc::channel();
    let (second_to_rhai, second_from_host) = mpsc::channel();
    let (save_to_rhai, save_from_host) = mpsc::channel();
    (
        HostPortals{
            to_host, first_from_host, second_from_host, save_from_host,
        },
        RhaiPortals{
            from_rhai, first_to_rhai, second_to_rhai, save_to_rhai,
        }
    )
}

pub fn construct_rhai_engine(host_portals: HostPortals) -> Engine {
    let mut engine = Engine::new();

    let HostPortals{
        to_host, first_from_host, second_from_host, save_from_host,
    } = host_portals;

    let receive_err = "Mergeimg: rhai thread could not receive from host.";
    let send_err = "Mergeimg: rhai thread could not send to host.";

    let th_first = to_host.clone();
    let th_second = to_host.clone();
    let th_save = to_host.clone();
    let th_reset = to_host.clone();

    engine
        .register_fn("kill", move || {
            to_host.send(HostMsg::Kill).expect(send_err);
        })
        .register_fn("reset", move || {
            th_reset.send(HostMsg::Reset).expect(send_err);
        })
        .register_fn("load_first", move |path: String| -> bool {
            th_first.send(HostMsg::LoadFirst(path)).expect(send_err);
            first_from_host.recv().expect(receive_err)
        })
        .register_fn("load_second", move |path: String| -> bool {
            th_second.send(HostMsg::LoadSecond(path)).expect(send_err);
            second_from_host.recv().expect(receive_err)
        })
        .register_fn("save", move |name: String| -> bool {
            th_save.send(HostMsg::Save(name)).expect(send_err);
            save_from_host.recv().expect(receive_err)
        })
    ;

    engine
}
